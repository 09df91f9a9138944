//! Binding candidate clusters to ground-truth clusters.

use crate::aggregate::aggregate_present;
use crate::vector::VectorSpace;
use crate::{ClusterId, Clustering, DocumentId, Result, TermVector, Vocabulary};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Ground-truth cluster a candidate cluster is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "cluster")]
pub enum Link {
    Linked(ClusterId),
    /// No ground-truth cluster is related to the candidate at all.
    Unlinked,
}

impl Link {
    pub fn target(&self) -> Option<ClusterId> {
        match self {
            Link::Linked(id) => Some(*id),
            Link::Unlinked => None,
        }
    }
}

pub type LinkTable = BTreeMap<ClusterId, Link>;

pub trait Linker {
    /// Link every cluster of `candidate` to a cluster of `real`.
    fn link(&self, real: &Clustering, candidate: &Clustering) -> Result<LinkTable>;
}

/// Picks the strict maximum of `scores` above `floor`; earlier entries win ties.
fn best_above<I>(scores: I, floor: f64) -> Link
where
    I: IntoIterator<Item = (ClusterId, f64)>,
{
    let mut best = Link::Unlinked;
    let mut best_score = floor;
    for (cluster_id, score) in scores {
        if score > best_score {
            best_score = score;
            best = Link::Linked(cluster_id);
        }
    }
    best
}

/// Links each candidate cluster to the ground-truth cluster sharing the most documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapLinker;

impl Linker for OverlapLinker {
    fn link(&self, real: &Clustering, candidate: &Clustering) -> Result<LinkTable> {
        let mut links = LinkTable::new();
        for (cluster_id, members) in candidate.iter() {
            let overlaps = real.overlap_counts(members);
            let link = best_above(overlaps.into_iter().map(|(r, n)| (r, n as f64)), 0.0);
            links.insert(cluster_id, link);
        }
        let unlinked = links.values().filter(|l| **l == Link::Unlinked).count();
        tracing::info!(clusters = links.len(), unlinked, "linked clusters by document overlap");
        Ok(links)
    }
}

/// Links each candidate cluster to the ground-truth vector it is most similar to.
///
/// Candidate clusters are represented by the sum of their members' vectors;
/// ground-truth clusters by whatever vectors the linker was built with
/// (theme text or member sums). Similarities are taken over `vocabulary`.
#[derive(Debug, Clone)]
pub struct SimilarityLinker<'a> {
    vocabulary: &'a Vocabulary,
    documents: &'a HashMap<DocumentId, TermVector>,
    real_vectors: BTreeMap<ClusterId, TermVector>,
}

impl<'a> SimilarityLinker<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        documents: &'a HashMap<DocumentId, TermVector>,
        real_vectors: BTreeMap<ClusterId, TermVector>,
    ) -> Self {
        Self { vocabulary, documents, real_vectors }
    }

    /// Represent each ground-truth cluster by the sum of its members' vectors.
    ///
    /// The ground truth may cover documents outside `documents`; those add nothing.
    pub fn from_real_clustering(
        vocabulary: &'a Vocabulary,
        documents: &'a HashMap<DocumentId, TermVector>,
        real: &Clustering,
    ) -> Self {
        let (real_vectors, _skipped) = aggregate_present(real, documents);
        Self::new(vocabulary, documents, real_vectors)
    }
}

impl Linker for SimilarityLinker<'_> {
    fn link(&self, _real: &Clustering, candidate: &Clustering) -> Result<LinkTable> {
        let space = VectorSpace::new(self.vocabulary);
        let (candidate_vectors, _skipped) = aggregate_present(candidate, self.documents);
        let mut links = LinkTable::new();
        for (cluster_id, vector) in &candidate_vectors {
            let similarities = self
                .real_vectors
                .iter()
                .map(|(real_id, real_vector)| (*real_id, space.cosine(vector, real_vector)));
            links.insert(*cluster_id, best_above(similarities, 0.0));
        }
        let unlinked = links.values().filter(|l| **l == Link::Unlinked).count();
        tracing::info!(clusters = links.len(), unlinked, "linked clusters by cosine similarity");
        Ok(links)
    }
}
