//! Compile-time defaults shared by the indexer, the server and the library.
//!
//! Runtime configuration is handled by CLI arguments and environment variables
//! in the binaries.

/// Number of columns added to the term-document matrix each time the
/// vocabulary outgrows it.
pub const DEFAULT_COLUMN_BLOCK: usize = 7000;

/// Default relevance threshold (alpha) applied to cosine similarity.
pub const DEFAULT_ALPHA: f64 = 0.0005;

/// Stopword list looked up inside the index directory when none is given.
pub const DEFAULT_STOPWORDS_FILE: &str = "stopword_list.txt";

pub const MATRIX_FILE: &str = "matrix.bin";
pub const IDF_FILE: &str = "idf.bin";
pub const VOCABULARY_FILE: &str = "vocabulary.bin";
pub const META_FILE: &str = "meta.json";

/// Version written to `meta.json`; bump when an artifact layout changes.
pub const FORMAT_VERSION: u32 = 1;
