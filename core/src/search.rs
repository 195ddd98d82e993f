//! Cosine-similarity ranking over a finalized [`Model`].

use crate::index::Model;
use crate::tokenizer::{query_terms, Normalizer};
use crate::DocId;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub doc_id: DocId,
    pub score: f64,
}

/// Read-only query engine. Holds the model and the normalizer used to build
/// it; safe to share across threads.
pub struct SearchEngine {
    model: Model,
    normalizer: Box<dyn Normalizer>,
}

impl SearchEngine {
    pub fn new(model: Model, normalizer: Box<dyn Normalizer>) -> Self { Self { model, normalizer } }

    pub fn model(&self) -> &Model { &self.model }

    /// Raw query term-frequency vector in vocabulary space. Unknown terms
    /// are ignored.
    pub fn query_vector(&self, text: &str) -> Vec<f64> {
        let vocab = self.model.vocabulary();
        let mut q = vec![0.0; self.model.matrix().cols()];
        for term in query_terms(text, self.normalizer.as_ref()) {
            if let Some(id) = vocab.get(&term) {
                q[id as usize] += 1.0;
            }
        }
        q
    }

    /// Rank documents by cosine similarity of tf-idf vectors, keeping those
    /// scoring at least `threshold`. Highest score first; equal scores keep
    /// ascending document order.
    pub fn calculate(&self, text: &str, threshold: f64) -> Vec<Hit> {
        let q_tf = self.query_vector(text);
        if q_tf.iter().all(|&v| v == 0.0) {
            return Vec::new();
        }

        let idf = self.model.idf().as_slice();
        let q: Vec<f64> = q_tf.iter().zip(idf).map(|(tf, w)| tf * w).collect();
        let q_norm = norm(&q);
        let matrix = self.model.matrix();

        let scores: Vec<f64> = (0..matrix.rows())
            .into_par_iter()
            .map(|d| cosine(matrix.row(d as DocId), idf, &q, q_norm))
            .collect();

        let mut hits: Vec<Hit> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score >= threshold)
            .map(|(d, score)| Hit { doc_id: d as DocId, score })
            .collect();
        // stable: ties stay in doc id order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(query = text, threshold, hits = hits.len(), "query ranked");
        hits
    }
}

fn norm(v: &[f64]) -> f64 { v.iter().map(|x| x * x).sum::<f64>().sqrt() }

/// Cosine between the idf-weighted `row` and the weighted query `q`.
/// A zero-length vector on either side scores 0.
fn cosine(row: &[f64], idf: &[f64], q: &[f64], q_norm: f64) -> f64 {
    let mut dot = 0.0;
    let mut sq = 0.0;
    for ((tf, w), qv) in row.iter().zip(idf).zip(q) {
        let d = tf * w;
        dot += d * qv;
        sq += d * d;
    }
    let denom = sq.sqrt() * q_norm;
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_norm_scores_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0], &[1.0, 0.0], 1.0), 0.0);
        assert_eq!(cosine(&[1.0, 0.0], &[1.0, 1.0], &[0.0, 0.0], 0.0), 0.0);
    }

    #[test]
    fn parallel_vectors_score_one() {
        let s = cosine(&[2.0, 4.0], &[1.0, 1.0], &[1.0, 2.0], norm(&[1.0, 2.0]));
        assert!((s - 1.0).abs() < 1e-12);
    }
}
