use crate::{ClusterId, DocumentId, Error, Result};
use std::collections::{BTreeMap, HashMap};

/// First document ever assigned to each cluster.
pub type ClusterSeeds = BTreeMap<ClusterId, DocumentId>;

/// Cluster id -> members in assignment order.
///
/// A document belongs to at most one cluster; the reverse index is kept in
/// step with the member lists so membership tests stay O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clustering {
    clusters: BTreeMap<ClusterId, Vec<DocumentId>>,
    owner: HashMap<DocumentId, ClusterId>,
}

impl Clustering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `document` to `cluster_id`, creating the cluster if needed.
    pub fn assign(&mut self, cluster_id: ClusterId, document: impl Into<DocumentId>) -> Result<()> {
        let document = document.into();
        if let Some(&first) = self.owner.get(&document) {
            return Err(Error::DoubleAssignment { document, first, second: cluster_id });
        }
        self.owner.insert(document.clone(), cluster_id);
        self.clusters.entry(cluster_id).or_default().push(document);
        Ok(())
    }

    /// Build a clustering from `(cluster id, document)` pairs in order.
    pub fn from_pairs<I, D>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ClusterId, D)>,
        D: Into<DocumentId>,
    {
        let mut clustering = Self::new();
        for (cluster_id, doc) in pairs {
            clustering.assign(cluster_id, doc)?;
        }
        Ok(clustering)
    }

    pub fn members(&self, cluster_id: ClusterId) -> Option<&[DocumentId]> {
        self.clusters.get(&cluster_id).map(Vec::as_slice)
    }

    pub fn cluster_of(&self, document: &str) -> Option<ClusterId> {
        self.owner.get(document).copied()
    }

    /// Clusters in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &[DocumentId])> {
        self.clusters.iter().map(|(id, docs)| (*id, docs.as_slice()))
    }

    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.clusters.keys().copied()
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of assigned documents across all clusters.
    pub fn document_count(&self) -> usize {
        self.owner.len()
    }

    /// For each cluster of `self` sharing at least one of `documents`, the
    /// size of the shared part.
    pub fn overlap_counts(&self, documents: &[DocumentId]) -> BTreeMap<ClusterId, usize> {
        let mut counts = BTreeMap::new();
        for doc in documents {
            if let Some(cluster_id) = self.cluster_of(doc) {
                *counts.entry(cluster_id).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_assignment_order() {
        let mut c = Clustering::new();
        c.assign(2, "b").unwrap();
        c.assign(1, "a").unwrap();
        c.assign(2, "c").unwrap();
        assert_eq!(c.members(2).unwrap(), ["b", "c"]);
        assert_eq!(c.cluster_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(c.document_count(), 3);
    }

    #[test]
    fn rejects_double_assignment() {
        let mut c = Clustering::new();
        c.assign(1, "a").unwrap();
        let err = c.assign(2, "a").unwrap_err();
        assert!(matches!(err, Error::DoubleAssignment { first: 1, second: 2, .. }));
    }

    #[test]
    fn counts_overlap_per_cluster() {
        let c = Clustering::from_pairs([(1, "a"), (1, "b"), (2, "c")]).unwrap();
        let counts = c.overlap_counts(&["a".into(), "c".into(), "z".into()]);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&1));
    }
}
