//! Dense term-document frequency matrix.
//!
//! Rows are documents and columns are vocabulary ids. During indexing the
//! matrix lives as a [`GrowableMatrix`] that over-allocates columns in fixed
//! blocks; [`GrowableMatrix::finalize`] trims it to an immutable
//! [`TermDocMatrix`] whose width equals the vocabulary size.

use crate::{DocId, TermId};
use serde::{Deserialize, Serialize};

/// Row-major matrix under construction. Values are raw counts stored as `f64`.
#[derive(Debug)]
pub struct GrowableMatrix {
    rows: usize,
    cols: usize,
    block: usize,
    data: Vec<f64>,
}

impl GrowableMatrix {
    /// `block` is the number of columns allocated up front and added on every
    /// growth step. A zero block is treated as one.
    pub fn new(rows: usize, block: usize) -> Self {
        let block = block.max(1);
        Self { rows, cols: block, block, data: vec![0.0; rows * block] }
    }

    pub fn rows(&self) -> usize { self.rows }

    /// Allocated column capacity, which may exceed the vocabulary size.
    pub fn cols(&self) -> usize { self.cols }

    /// Add one occurrence of `term_id` to `doc_id`, growing columns first if
    /// the term lies past the current capacity.
    ///
    /// Panics if `doc_id` is not a row of this matrix.
    pub fn increment(&mut self, doc_id: DocId, term_id: TermId) {
        let (d, t) = (doc_id as usize, term_id as usize);
        assert!(d < self.rows, "document {d} out of range ({} rows)", self.rows);
        if t >= self.cols {
            let blocks = (t - self.cols) / self.block + 1;
            self.grow(self.cols + blocks * self.block);
        }
        self.data[d * self.cols + t] += 1.0;
    }

    pub fn get(&self, doc_id: DocId, term_id: TermId) -> f64 {
        let (d, t) = (doc_id as usize, term_id as usize);
        if d >= self.rows || t >= self.cols {
            return 0.0;
        }
        self.data[d * self.cols + t]
    }

    /// Reallocate to `new_cols`, copying each row and zero-filling the rest.
    fn grow(&mut self, new_cols: usize) {
        tracing::trace!(from = self.cols, to = new_cols, "growing term-document matrix");
        self.data = resize_rows(&self.data, self.rows, self.cols, new_cols);
        self.cols = new_cols;
    }

    /// Trim unused trailing columns so the width equals `vocab_len`.
    pub fn finalize(self, vocab_len: usize) -> TermDocMatrix {
        let data = resize_rows(&self.data, self.rows, self.cols, vocab_len);
        TermDocMatrix { rows: self.rows, cols: vocab_len, data }
    }
}

fn resize_rows(data: &[f64], rows: usize, old_cols: usize, new_cols: usize) -> Vec<f64> {
    let keep = old_cols.min(new_cols);
    let mut out = vec![0.0; rows * new_cols];
    for r in 0..rows {
        out[r * new_cols..r * new_cols + keep].copy_from_slice(&data[r * old_cols..r * old_cols + keep]);
    }
    out
}

/// Finalized, read-only term-document matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDocMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TermDocMatrix {
    /// Build from row-major data. Returns `None` when the length does not
    /// match `rows * cols`.
    pub fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (rows.checked_mul(cols) == Some(data.len())).then_some(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn cols(&self) -> usize { self.cols }

    pub fn row(&self, doc_id: DocId) -> &[f64] {
        let d = doc_id as usize;
        &self.data[d * self.cols..(d + 1) * self.cols]
    }

    /// Count at `(doc_id, term_id)`; zero outside the matrix.
    pub fn get(&self, doc_id: DocId, term_id: TermId) -> f64 {
        let (d, t) = (doc_id as usize, term_id as usize);
        if d >= self.rows || t >= self.cols {
            return 0.0;
        }
        self.data[d * self.cols + t]
    }

    /// Number of documents with a nonzero count per column.
    pub fn document_frequencies(&self) -> Vec<u32> {
        let mut df = vec![0u32; self.cols];
        for r in 0..self.rows {
            for (slot, &v) in df.iter_mut().zip(&self.data[r * self.cols..(r + 1) * self.cols]) {
                if v > 0.0 {
                    *slot += 1;
                }
            }
        }
        df
    }

    pub(crate) fn is_consistent(&self) -> bool { self.rows.checked_mul(self.cols) == Some(self.data.len()) }
}
