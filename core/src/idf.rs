use crate::matrix::TermDocMatrix;
use serde::{Deserialize, Serialize};

/// Inverse document frequency per vocabulary column:
/// `idf[t] = -log10(df[t] / N)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdfVector(Vec<f64>);

impl IdfVector {
    /// Compute from a finalized matrix. Columns nobody uses (df = 0) get a
    /// weight of zero rather than infinity.
    pub fn from_matrix(matrix: &TermDocMatrix) -> Self {
        let n = matrix.rows() as f64;
        let weights = matrix
            .document_frequencies()
            .into_iter()
            .map(|df| if df == 0 { 0.0 } else { -(df as f64 / n).log10() })
            .collect();
        Self(weights)
    }

    pub fn from_vec(weights: Vec<f64>) -> Self { Self(weights) }

    pub fn as_slice(&self) -> &[f64] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log10_of_inverse_document_ratio() {
        // 4 docs; term 0 in every doc, term 1 in one, term 2 in two.
        let data = vec![
            1.0, 3.0, 1.0, //
            2.0, 0.0, 0.0, //
            1.0, 0.0, 5.0, //
            1.0, 0.0, 0.0,
        ];
        let m = TermDocMatrix::from_raw(4, 3, data).unwrap();
        let idf = IdfVector::from_matrix(&m);
        let w = idf.as_slice();
        assert_eq!(w[0], 0.0);
        assert!((w[1] - 4f64.log10()).abs() < 1e-12);
        assert!((w[2] - 2f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn empty_matrix_has_empty_idf() {
        let m = TermDocMatrix::from_raw(0, 0, vec![]).unwrap();
        assert!(IdfVector::from_matrix(&m).is_empty());
    }
}
