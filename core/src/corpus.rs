//! Corpus enumeration. The position of a file in the listing is its document
//! id, so the same ordering must be used at index time and when resolving
//! ids back to files.

use crate::error::BuildError;
use crate::DocId;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct CorpusListing {
    pub root: PathBuf,
    files: Vec<PathBuf>,
}

impl CorpusListing {
    /// List the regular files directly under `root`, ordered by the number
    /// embedded in their names.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(BuildError::MissingCorpus(root.to_path_buf()).into());
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("listing corpus {}", root.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort_by(|a, b| compare_names(&file_name_of(a), &file_name_of(b)));
        Ok(Self { root: root.to_path_buf(), files })
    }

    pub fn len(&self) -> usize { self.files.len() }

    pub fn is_empty(&self) -> bool { self.files.is_empty() }

    pub fn paths(&self) -> &[PathBuf] { &self.files }

    pub fn path(&self, doc_id: DocId) -> Option<&Path> { self.files.get(doc_id as usize).map(PathBuf::as_path) }

    pub fn file_name(&self, doc_id: DocId) -> Option<String> { self.path(doc_id).map(file_name_of) }

    /// First line of the document, used as its display title.
    pub fn title(&self, doc_id: DocId) -> Result<Option<String>> {
        let Some(path) = self.path(doc_id) else { return Ok(None) };
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(text.lines().next().unwrap_or("").trim().to_string()))
    }

    pub fn text(&self, doc_id: DocId) -> Result<Option<String>> {
        let Some(path) = self.path(doc_id) else { return Ok(None) };
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(text))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Compare file names by their embedded digits read as one number, e.g.
/// `speech_2` before `speech_10`. Names without digits go last. Equal numbers
/// fall back to the plain name.
fn compare_names(a: &str, b: &str) -> Ordering {
    match (digits_key(a), digits_key(b)) {
        (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.cmp(b))
}

/// All ASCII digits of `name` concatenated, leading zeros stripped.
fn digits_key(name: &str) -> Option<String> {
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
}
