use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Bm25Error, Result};

/// A sparse vector representation for BM25 embeddings.
///
/// This is designed to be compatible with Qdrant's sparse vector format.
/// Each non-zero dimension is represented by an index-value pair. Indices are
/// unique but carry no ordering guarantee: they follow the order in which each
/// term first appeared in the source text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Create a new sparse vector from indices and values.
    ///
    /// # Errors
    /// Returns [`Bm25Error::InvalidInput`] if `indices` and `values` have
    /// different lengths.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Bm25Error::InvalidInput(format!(
                "indices and values must have the same length ({} != {})",
                indices.len(),
                values.len()
            )));
        }
        Ok(SparseVector { indices, values })
    }

    /// Create an empty sparse vector.
    pub fn empty() -> Self {
        SparseVector {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of non-zero entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Sparse dot product. With a document vector on one side and a query
    /// vector on the other this is the (normalized) BM25 score.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let lookup: HashMap<u32, f32> = large.iter().collect();
        small
            .iter()
            .filter_map(|(idx, value)| lookup.get(&idx).map(|other| value * other))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_new_rejects_mismatched_lengths() {
        let result = SparseVector::new(vec![1, 2, 3], vec![0.5]);
        assert!(matches!(result, Err(Bm25Error::InvalidInput(_))));
    }

    #[rstest]
    fn test_empty() {
        let v = SparseVector::empty();
        assert_eq!(v.len(), 0);
        assert!(v.is_empty());
        assert_eq!(v, SparseVector::default());
    }

    #[rstest]
    fn test_dot_only_counts_shared_indices() {
        let a = SparseVector::new(vec![10, 20, 30], vec![0.5, 0.25, 1.0]).unwrap();
        let b = SparseVector::new(vec![30, 99, 10], vec![2.0, 7.0, 4.0]).unwrap();
        assert_eq!(a.dot(&b), 0.5 * 4.0 + 1.0 * 2.0);
        assert_eq!(b.dot(&a), a.dot(&b));
    }

    #[rstest]
    fn test_dot_with_empty_is_zero() {
        let a = SparseVector::new(vec![1], vec![1.0]).unwrap();
        assert_eq!(a.dot(&SparseVector::empty()), 0.0);
    }

    #[rstest]
    fn test_serde_field_names() {
        let v = SparseVector::new(vec![7], vec![0.5]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"indices":[7],"values":[0.5]}"#);
    }
}
