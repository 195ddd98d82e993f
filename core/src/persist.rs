use crate::config::{FORMAT_VERSION, IDF_FILE, MATRIX_FILE, META_FILE, VOCABULARY_FILE};
use crate::idf::IdfVector;
use crate::index::Model;
use crate::matrix::TermDocMatrix;
use crate::tokenizer::Normalizer;
use crate::vocabulary::Vocabulary;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

/// Informational summary written next to the artifacts. Not needed to load.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
    /// Name of the normalizer the model was built with; empty when unknown.
    #[serde(default)]
    pub normalizer: String,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn matrix(&self) -> PathBuf { self.root.join(MATRIX_FILE) }
    pub fn idf(&self) -> PathBuf { self.root.join(IDF_FILE) }
    pub fn vocabulary(&self) -> PathBuf { self.root.join(VOCABULARY_FILE) }
    pub fn meta(&self) -> PathBuf { self.root.join(META_FILE) }

    /// True when all three model artifacts exist.
    pub fn is_complete(&self) -> bool {
        self.matrix().is_file() && self.idf().is_file() && self.vocabulary().is_file()
    }
}

/// Write via a temp file and rename so a crash never leaves a half-written
/// artifact under the final name.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

fn save_bin<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value)?;
    write_atomic(path, &bytes)
}

fn load_bin<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let buf = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let value = bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))?;
    Ok(value)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    write_atomic(&paths.meta(), json.as_bytes())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let buf = fs::read_to_string(paths.meta())?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Persist matrix, idf and vocabulary, then `meta.json` recording the
/// normalizer the model was built with.
pub fn save_model(paths: &IndexPaths, model: &Model, normalizer: &dyn Normalizer) -> Result<()> {
    create_dir_all(&paths.root).with_context(|| format!("creating {}", paths.root.display()))?;
    save_bin(&paths.matrix(), model.matrix())?;
    save_bin(&paths.idf(), model.idf())?;
    save_bin(&paths.vocabulary(), model.vocabulary())?;

    let meta = MetaFile {
        num_docs: model.num_docs() as u32,
        num_terms: model.vocabulary().len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: FORMAT_VERSION,
        normalizer: normalizer.name().to_string(),
    };
    save_meta(paths, &meta)?;
    tracing::info!(index = %paths.root.display(), num_docs = meta.num_docs, num_terms = meta.num_terms, "model saved");
    Ok(())
}

/// Check `normalizer` against the one recorded in `meta.json`, warning on a
/// mismatch. A missing or unlabeled meta file counts as a match.
pub fn normalizer_matches(paths: &IndexPaths, normalizer: &dyn Normalizer) -> bool {
    let Ok(meta) = load_meta(paths) else { return true };
    if meta.normalizer.is_empty() || meta.normalizer == normalizer.name() {
        return true;
    }
    tracing::warn!(
        index = %paths.root.display(),
        built_with = %meta.normalizer,
        querying_with = normalizer.name(),
        "normalizer differs from the one used to build the model; inflected terms may not match"
    );
    false
}

/// Read all three artifacts, failing on any missing, undecodable or
/// mismatched part.
pub fn read_model(paths: &IndexPaths) -> Result<Model> {
    let matrix: TermDocMatrix = load_bin(&paths.matrix())?;
    let idf: IdfVector = load_bin(&paths.idf())?;
    let vocabulary: Vocabulary = load_bin(&paths.vocabulary())?;
    Model::from_parts(matrix, vocabulary, idf)
}

/// Load a persisted model. A partial or malformed artifact set is a cache
/// miss, reported as `None`.
pub fn load_model(paths: &IndexPaths) -> Option<Model> {
    if !paths.is_complete() {
        tracing::debug!(index = %paths.root.display(), "artifact set incomplete, rebuild required");
        return None;
    }
    match read_model(paths) {
        Ok(model) => Some(model),
        Err(err) => {
            tracing::warn!(index = %paths.root.display(), error = %format!("{err:#}"), "ignoring unreadable model artifacts");
            None
        }
    }
}
