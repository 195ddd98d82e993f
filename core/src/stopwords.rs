use crate::error::BuildError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable set of terms excluded from indexing.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Parse a whitespace-delimited word list.
    pub fn parse(text: &str) -> Self {
        Self { words: text.split_whitespace().map(str::to_string).collect() }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BuildError::MissingStopwords(path.to_path_buf()).into());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading stopword list {}", path.display()))?;
        let set = Self::parse(&text);
        tracing::debug!(path = %path.display(), words = set.len(), "loaded stopwords");
        Ok(set)
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { words: iter.into_iter().map(Into::into).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_whitespace() {
        let s = StopwordSet::parse("the and\nwas\t a  \n\n");
        assert_eq!(s.len(), 4);
        assert!(s.contains("was"));
        assert!(!s.contains(""));
    }

    #[test]
    fn missing_file_is_a_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StopwordSet::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::MissingStopwords(_))));
    }
}
