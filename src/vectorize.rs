//! Sparse count vectors from token multisets

use crate::pipeline::Transform;
use crate::types::TokenMultiset;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use sprs::{CsMat, TriMat};
use tracing::debug;

/// Document-by-word count matrix in CSR layout.
///
/// Row `i` belongs to input document `i`; column 0 collects
/// out-of-vocabulary counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMatrix(CsMat<usize>);

impl FeatureMatrix {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.0.cols()
    }

    /// Number of stored non-zero cells
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.0.nnz()
    }

    /// Count at `(row, col)`, zero when not stored or out of bounds
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.0.get(row, col).copied().unwrap_or(0)
    }

    /// Sum of one row
    #[must_use]
    pub fn row_sum(&self, row: usize) -> usize {
        self.0
            .outer_view(row)
            .map_or(0, |view| view.data().iter().sum())
    }

    /// Non-zero `(column, count)` pairs of one row, by column
    #[must_use]
    pub fn row_entries(&self, row: usize) -> Vec<(usize, usize)> {
        self.0.outer_view(row).map_or_else(Vec::new, |view| {
            view.iter().map(|(col, count)| (col, *count)).collect()
        })
    }

    #[must_use]
    pub const fn as_csr(&self) -> &CsMat<usize> {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> CsMat<usize> {
        self.0
    }
}

impl Transform<TokenMultiset> for Vocabulary {
    type Output = FeatureMatrix;

    fn transform(&self, docs: &[TokenMultiset]) -> Self::Output {
        let mut triplets = TriMat::new((docs.len(), self.size() + 1));
        for (row, doc) in docs.iter().enumerate() {
            for (word, count) in doc.iter() {
                if count > 0 {
                    triplets.add_triplet(row, self.column(word), count);
                }
            }
        }

        // Duplicate (row, column) triplets are summed
        let matrix: CsMat<usize> = triplets.to_csr();

        debug!(
            "Vectorized {} documents into {} columns ({} non-zero cells)",
            matrix.rows(),
            matrix.cols(),
            matrix.nnz()
        );

        FeatureMatrix(matrix)
    }
}

/// Map multisets to count vectors with an already fitted vocabulary
#[must_use]
pub fn vectorize(token_multisets: &[TokenMultiset], vocabulary: &Vocabulary) -> FeatureMatrix {
    vocabulary.transform(token_multisets)
}
