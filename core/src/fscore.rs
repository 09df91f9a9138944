//! F-score evaluation of a candidate clustering against ground truth.
//!
//! For a candidate cluster `c` linked to a real cluster `r`:
//! precision = |c ∩ r| / |c|, recall = |c ∩ r| / |r|, and the cluster's
//! F-score is their harmonic mean. The clustering's accuracy is the plain
//! mean of its clusters' F-scores, whatever their sizes.

use crate::link::{Link, LinkTable};
use crate::{ClusterId, Clustering, Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterScore {
    pub link: Link,
    pub size: usize,
    pub real_size: usize,
    pub correct: usize,
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub clusters: BTreeMap<ClusterId, ClusterScore>,
    /// Unweighted mean of the per-cluster F-scores.
    pub accuracy: f64,
}

impl ScoreReport {
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn f_score(&self, cluster_id: ClusterId) -> Option<f64> {
        self.clusters.get(&cluster_id).map(|s| s.f_score)
    }
}

/// Harmonic mean of precision and recall; zero when nothing is correct.
pub fn f_score(candidate_size: usize, real_size: usize, correct: usize) -> (f64, f64, f64) {
    if correct == 0 {
        return (0.0, 0.0, 0.0);
    }
    let precision = correct as f64 / candidate_size as f64;
    let recall = correct as f64 / real_size as f64;
    (precision, recall, 2.0 * precision * recall / (precision + recall))
}

pub fn score(real: &Clustering, candidate: &Clustering, links: &LinkTable) -> Result<ScoreReport> {
    let mut clusters = BTreeMap::new();
    for (cluster_id, members) in candidate.iter() {
        let link = *links.get(&cluster_id).ok_or(Error::MissingLink(cluster_id))?;
        let (real_size, correct) = match link {
            Link::Unlinked => (0, 0),
            Link::Linked(real_id) => {
                let real_size = real.members(real_id).map_or(0, <[_]>::len);
                let correct = members
                    .iter()
                    .filter(|doc| real.cluster_of(doc) == Some(real_id))
                    .count();
                (real_size, correct)
            }
        };
        let (precision, recall, f_score) = f_score(members.len(), real_size, correct);
        clusters.insert(
            cluster_id,
            ClusterScore { link, size: members.len(), real_size, correct, precision, recall, f_score },
        );
    }

    let accuracy = if clusters.is_empty() {
        0.0
    } else {
        clusters.values().map(|s| s.f_score).sum::<f64>() / clusters.len() as f64
    };
    tracing::info!(clusters = clusters.len(), accuracy, "scored clustering");
    Ok(ScoreReport { clusters, accuracy })
}
