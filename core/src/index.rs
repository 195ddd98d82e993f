use crate::config::DEFAULT_COLUMN_BLOCK;
use crate::corpus::CorpusListing;
use crate::error::BuildError;
use crate::idf::IdfVector;
use crate::matrix::{GrowableMatrix, TermDocMatrix};
use crate::persist::{load_model, normalizer_matches, save_model, IndexPaths};
use crate::stopwords::StopwordSet;
use crate::tokenizer::{index_terms, Normalizer};
use crate::vocabulary::Vocabulary;
use crate::DocId;
use anyhow::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Columns added per matrix growth step.
    pub column_block: usize,
}

impl Default for BuildOptions {
    fn default() -> Self { Self { column_block: DEFAULT_COLUMN_BLOCK } }
}

/// The immutable result of one indexing run: raw counts, vocabulary and idf.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    matrix: TermDocMatrix,
    vocabulary: Vocabulary,
    idf: IdfVector,
}

impl Model {
    /// Assemble a model, checking that all three parts agree on the number of
    /// columns.
    pub fn from_parts(matrix: TermDocMatrix, vocabulary: Vocabulary, idf: IdfVector) -> Result<Self> {
        if !matrix.is_consistent() || matrix.cols() != vocabulary.len() || matrix.cols() != idf.len() {
            return Err(BuildError::InconsistentModel(format!(
                "matrix {}x{}, vocabulary {}, idf {}",
                matrix.rows(),
                matrix.cols(),
                vocabulary.len(),
                idf.len()
            ))
            .into());
        }
        Ok(Self { matrix, vocabulary, idf })
    }

    pub fn matrix(&self) -> &TermDocMatrix { &self.matrix }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn idf(&self) -> &IdfVector { &self.idf }

    pub fn num_docs(&self) -> usize { self.matrix.rows() }
}

/// Owns the mutable indexing state until [`IndexBuilder::finish`] turns it
/// into a [`Model`].
pub struct IndexBuilder<'a> {
    vocabulary: Vocabulary,
    matrix: GrowableMatrix,
    stopwords: &'a StopwordSet,
    normalizer: &'a dyn Normalizer,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(num_docs: usize, stopwords: &'a StopwordSet, normalizer: &'a dyn Normalizer, options: BuildOptions) -> Self {
        Self {
            vocabulary: Vocabulary::new(),
            matrix: GrowableMatrix::new(num_docs, options.column_block),
            stopwords,
            normalizer,
        }
    }

    /// Index a whole document. The first line is its title and is skipped.
    pub fn index_document(&mut self, doc_id: DocId, text: &str) {
        for line in text.lines().skip(1) {
            self.index_line(doc_id, line);
        }
    }

    pub fn index_line(&mut self, doc_id: DocId, line: &str) {
        for term in index_terms(line, self.normalizer, self.stopwords) {
            let term_id = self.vocabulary.get_or_create(&term);
            self.matrix.increment(doc_id, term_id);
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    /// Trim the matrix to the vocabulary and derive the idf vector.
    pub fn finish(self) -> Model {
        let matrix = self.matrix.finalize(self.vocabulary.len());
        let idf = IdfVector::from_matrix(&matrix);
        Model { matrix, vocabulary: self.vocabulary, idf }
    }
}

/// Index every document of `corpus_dir` in listing order. Any unreadable
/// document aborts the build.
pub fn build_model(corpus_dir: &Path, stopwords_path: &Path, normalizer: &dyn Normalizer, options: BuildOptions) -> Result<Model> {
    let listing = CorpusListing::scan(corpus_dir)?;
    let stopwords = StopwordSet::load(stopwords_path)?;
    tracing::info!(corpus = %corpus_dir.display(), docs = listing.len(), stopwords = stopwords.len(), "indexing corpus");

    let mut builder = IndexBuilder::new(listing.len(), &stopwords, normalizer, options);
    for (doc_id, path) in listing.paths().iter().enumerate() {
        let text = fs::read_to_string(path)
            .map_err(|source| BuildError::UnreadableDocument { path: path.clone(), source })?;
        builder.index_document(doc_id as DocId, &text);
    }

    let model = builder.finish();
    tracing::info!(num_docs = model.num_docs(), num_terms = model.vocabulary().len(), "ingested documents");
    Ok(model)
}

/// Load the persisted model if the complete artifact set is readable,
/// otherwise rebuild from the corpus and persist the result.
pub fn load_or_build(
    paths: &IndexPaths,
    corpus_dir: &Path,
    stopwords_path: &Path,
    normalizer: &dyn Normalizer,
    options: BuildOptions,
) -> Result<Model> {
    if let Some(model) = load_model(paths) {
        tracing::info!(index = %paths.root.display(), num_docs = model.num_docs(), "loaded persisted model");
        normalizer_matches(paths, normalizer);
        return Ok(model);
    }
    let model = build_model(corpus_dir, stopwords_path, normalizer, options)?;
    save_model(paths, &model, normalizer)?;
    Ok(model)
}
