use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

use std::fmt;
use std::str::FromStr;

use crate::stopwords::StopwordSet;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W").expect("valid regex");
}

/// Word normalization applied after lower-casing, at index and query time
/// alike. Implementations must map the empty string to the empty string.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;

    /// Label recorded with a saved model so a mismatched query-time
    /// normalizer can be reported.
    fn name(&self) -> &str { "custom" }
}

/// Leaves words untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Normalizer for Identity {
    fn normalize(&self, word: &str) -> String { word.to_string() }

    fn name(&self) -> &str { "identity" }
}

/// NFKC normalization followed by the Snowball English stemmer.
pub struct EnglishStemmer {
    stemmer: Stemmer,
}

impl EnglishStemmer {
    pub fn new() -> Self { Self { stemmer: Stemmer::create(Algorithm::English) } }
}

impl Default for EnglishStemmer {
    fn default() -> Self { Self::new() }
}

impl Normalizer for EnglishStemmer {
    fn normalize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        let composed = word.nfkc().collect::<String>();
        self.stemmer.stem(&composed).into_owned()
    }

    fn name(&self) -> &str { "english" }
}

/// Built-in normalizers selectable by name from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stemming {
    /// Snowball English stemmer
    #[default]
    English,
    /// Words as they appear (lower-cased)
    Identity,
}

impl Stemming {
    pub fn name(self) -> &'static str {
        match self {
            Stemming::English => "english",
            Stemming::Identity => "identity",
        }
    }

    pub fn normalizer(self) -> Box<dyn Normalizer> {
        match self {
            Stemming::English => Box::new(EnglishStemmer::new()),
            Stemming::Identity => Box::new(Identity),
        }
    }
}

impl fmt::Display for Stemming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Stemming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" => Ok(Stemming::English),
            "identity" => Ok(Stemming::Identity),
            other => Err(format!("unknown stemmer {other:?}, expected english or identity")),
        }
    }
}

/// Index-time terms of one line: split on non-word characters, trim commas
/// and apostrophes, lower-case, normalize, then drop empties and stopwords.
pub fn index_terms<'a>(
    line: &'a str,
    normalizer: &'a dyn Normalizer,
    stopwords: &'a StopwordSet,
) -> impl Iterator<Item = String> + 'a {
    NON_WORD
        .split(line)
        .map(move |raw| {
            let trimmed = raw.trim_matches(|c| c == ',' || c == '\'');
            normalizer.normalize(&trimmed.to_lowercase())
        })
        .filter(move |term| !term.is_empty() && !stopwords.contains(term))
}

/// Query-time terms: whitespace split, lower-case, normalize. Stopwords are
/// deliberately not removed here.
pub fn query_terms<'a>(text: &'a str, normalizer: &'a dyn Normalizer) -> impl Iterator<Item = String> + 'a {
    text.split_whitespace().map(move |w| normalizer.normalize(&w.to_lowercase()))
}
