use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions of an index build. No partial model is persisted when one
/// of these is raised.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("corpus directory not found: {0}")]
    MissingCorpus(PathBuf),

    #[error("stopword list not found: {0}")]
    MissingStopwords(PathBuf),

    #[error("failed to read document {path}: {source}")]
    UnreadableDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("inconsistent model: {0}")]
    InconsistentModel(String),
}
