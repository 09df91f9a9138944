//! Frequency vectors over a fixed vocabulary.
//!
//! Dense vectors have one coordinate per vocabulary term, in the vocabulary's
//! sorted order. The sparse operations on [`VectorSpace`] give the same
//! numbers without materialising that vector.

use crate::{Error, Result, TermVector, Vocabulary};

pub type DenseVector = Vec<u64>;

/// Sum of elementwise products. Both vectors must come from the same vocabulary.
pub fn dot(v1: &[u64], v2: &[u64]) -> Result<f64> {
    if v1.len() != v2.len() {
        return Err(Error::DimensionMismatch { expected: v1.len(), found: v2.len() });
    }
    let sum: u64 = v1.iter().zip(v2).map(|(a, b)| a * b).sum();
    Ok(sum as f64)
}

/// Euclidean norm.
pub fn norm(v: &[u64]) -> f64 {
    let sq: u64 = v.iter().map(|x| x * x).sum();
    (sq as f64).sqrt()
}

/// `dot / (norm1 * norm2)`, or `0.0` when either vector is all zeros.
pub fn cosine_similarity(v1: &[u64], v2: &[u64]) -> Result<f64> {
    let dot = dot(v1, v2)?;
    Ok(cosine_from_parts(dot, norm(v1), norm(v2)))
}

pub(crate) fn cosine_from_parts(dot: f64, norm1: f64, norm2: f64) -> f64 {
    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }
    dot / (norm1 * norm2)
}

/// A vocabulary to compare term vectors over.
///
/// Terms outside the vocabulary contribute nothing to any operation.
#[derive(Debug, Clone, Copy)]
pub struct VectorSpace<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> VectorSpace<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocabulary
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// One count per vocabulary term, zero where `terms` lacks the term.
    pub fn expand(&self, terms: &TermVector) -> DenseVector {
        self.vocabulary
            .iter()
            .map(|term| terms.get(term).copied().unwrap_or(0))
            .collect()
    }

    pub fn dot(&self, a: &TermVector, b: &TermVector) -> u64 {
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        small
            .iter()
            .filter(|(term, _)| self.vocabulary.contains(*term))
            .filter_map(|(term, count)| large.get(term).map(|other| count * other))
            .sum()
    }

    pub fn norm(&self, v: &TermVector) -> f64 {
        let sq: u64 = v
            .iter()
            .filter(|(term, _)| self.vocabulary.contains(*term))
            .map(|(_, count)| count * count)
            .sum();
        (sq as f64).sqrt()
    }

    /// Cosine similarity computed on the sparse vectors directly.
    pub fn cosine(&self, a: &TermVector, b: &TermVector) -> f64 {
        cosine_from_parts(self.dot(a, b) as f64, self.norm(a), self.norm(b))
    }
}
