pub mod config;
pub mod corpus;
pub mod error;
pub mod idf;
pub mod index;
pub mod matrix;
pub mod persist;
pub mod search;
pub mod stopwords;
pub mod tokenizer;
pub mod vocabulary;

pub type TermId = u32;
pub type DocId = u32;

pub use corpus::CorpusListing;
pub use error::BuildError;
pub use idf::IdfVector;
pub use index::{build_model, load_or_build, BuildOptions, IndexBuilder, Model};
pub use matrix::{GrowableMatrix, TermDocMatrix};
pub use search::{Hit, SearchEngine};
pub use stopwords::StopwordSet;
pub use tokenizer::{EnglishStemmer, Identity, Normalizer, Stemming};
pub use vocabulary::Vocabulary;
