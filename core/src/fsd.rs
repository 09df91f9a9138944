//! First story detection: single-pass, order-dependent clustering.

use crate::clustering::{ClusterSeeds, Clustering};
use crate::vector::{cosine_from_parts, VectorSpace};
use crate::{ClusterId, DocumentId, Error, Result, TermVector, Vocabulary};
use std::collections::{HashMap, HashSet};

/// Cosine similarity from which a document joins an existing cluster.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone)]
pub struct FsdOutput {
    pub clustering: Clustering,
    pub seeds: ClusterSeeds,
}

/// Greedy first-fit clusterer.
///
/// Each document is compared with the seed of every existing cluster, in
/// creation order, and joins the first one whose similarity reaches the
/// threshold. A document that joins nothing seeds a new cluster. Cluster ids
/// are handed out sequentially from 1.
#[derive(Debug, Clone, Copy)]
pub struct StreamingClusterer {
    threshold: f64,
}

impl Default for StreamingClusterer {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

struct Seed<'v> {
    cluster_id: ClusterId,
    vector: &'v TermVector,
    norm: f64,
}

impl StreamingClusterer {
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must be within [0, 1]",
            });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Cluster `order` in the given order, comparing vectors over `vocabulary`.
    pub fn cluster(
        &self,
        order: &[DocumentId],
        vectors: &HashMap<DocumentId, TermVector>,
        vocabulary: &Vocabulary,
    ) -> Result<FsdOutput> {
        let space = VectorSpace::new(vocabulary);
        let mut clustering = Clustering::new();
        let mut seeds_out = ClusterSeeds::new();
        let mut seeds: Vec<Seed<'_>> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(order.len());

        for (processed, doc) in order.iter().enumerate() {
            if !seen.insert(doc.as_str()) {
                return Err(Error::DuplicateDocument(doc.clone()));
            }
            let vector = vectors
                .get(doc)
                .ok_or_else(|| Error::UnknownDocument(doc.clone()))?;
            let norm = space.norm(vector);

            let joined = seeds
                .iter()
                .find(|seed| {
                    let dot = space.dot(vector, seed.vector) as f64;
                    cosine_from_parts(dot, norm, seed.norm) >= self.threshold
                })
                .map(|seed| seed.cluster_id);

            match joined {
                Some(cluster_id) => clustering.assign(cluster_id, doc.clone())?,
                None => {
                    let cluster_id = seeds.len() as ClusterId + 1;
                    clustering.assign(cluster_id, doc.clone())?;
                    seeds_out.insert(cluster_id, doc.clone());
                    seeds.push(Seed { cluster_id, vector, norm });
                }
            }

            if (processed + 1) % PROGRESS_EVERY == 0 {
                tracing::debug!(processed = processed + 1, clusters = seeds.len(), "fsd progress");
            }
        }

        tracing::info!(
            documents = order.len(),
            clusters = clustering.len(),
            threshold = self.threshold,
            "fsd clustering complete"
        );
        Ok(FsdOutput { clustering, seeds: seeds_out })
    }
}
