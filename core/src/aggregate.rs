use crate::{ClusterId, Clustering, DocumentId, Error, Result, TermVector};
use std::collections::{BTreeMap, HashMap};

/// Sum the term vectors of each cluster's members into one vector per cluster.
pub fn aggregate(
    clustering: &Clustering,
    vectors: &HashMap<DocumentId, TermVector>,
) -> Result<BTreeMap<ClusterId, TermVector>> {
    let mut out = BTreeMap::new();
    for (cluster_id, members) in clustering.iter() {
        let mut sum = TermVector::new();
        for doc in members {
            let vector = vectors
                .get(doc)
                .ok_or_else(|| Error::UnknownDocument(doc.clone()))?;
            for (term, count) in vector {
                *sum.entry(term.clone()).or_insert(0) += count;
            }
        }
        out.insert(cluster_id, sum);
    }
    tracing::debug!(clusters = out.len(), "aggregated cluster vectors");
    Ok(out)
}

/// Like [`aggregate`], but members without a term vector are left out of the
/// sums instead of failing. Returns the sums and the number of skipped members.
pub fn aggregate_present(
    clustering: &Clustering,
    vectors: &HashMap<DocumentId, TermVector>,
) -> (BTreeMap<ClusterId, TermVector>, usize) {
    let mut out = BTreeMap::new();
    let mut skipped = 0;
    for (cluster_id, members) in clustering.iter() {
        let mut sum = TermVector::new();
        for doc in members {
            let Some(vector) = vectors.get(doc) else {
                skipped += 1;
                continue;
            };
            for (term, count) in vector {
                *sum.entry(term.clone()).or_insert(0) += count;
            }
        }
        out.insert(cluster_id, sum);
    }
    if skipped > 0 {
        tracing::warn!(skipped, clusters = out.len(), "cluster members without term vectors left out of sums");
    }
    (out, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_member_counts_only() {
        let mut vectors = HashMap::new();
        vectors.insert("a".to_string(), TermVector::from([("quake".into(), 2), ("chile".into(), 1)]));
        vectors.insert("b".to_string(), TermVector::from([("quake".into(), 1)]));
        vectors.insert("c".to_string(), TermVector::from([("goal".into(), 4)]));
        let clustering = Clustering::from_pairs([(1, "a"), (1, "b"), (2, "c")]).unwrap();

        let agg = aggregate(&clustering, &vectors).unwrap();
        assert_eq!(agg[&1].get("quake"), Some(&3));
        assert_eq!(agg[&1].get("chile"), Some(&1));
        assert!(!agg[&1].contains_key("goal"));
        assert_eq!(agg[&2].get("goal"), Some(&4));
    }

    #[test]
    fn present_sums_skip_unknown_members() {
        let mut vectors = HashMap::new();
        vectors.insert("a".to_string(), TermVector::from([("quake".into(), 2)]));
        let clustering = Clustering::from_pairs([(1, "a"), (1, "ghost"), (2, "other")]).unwrap();

        let (agg, skipped) = aggregate_present(&clustering, &vectors);
        assert_eq!(skipped, 2);
        assert_eq!(agg[&1].get("quake"), Some(&2));
        assert!(agg[&2].is_empty());
    }

    #[test]
    fn unknown_member_is_an_error() {
        let clustering = Clustering::from_pairs([(1, "ghost")]).unwrap();
        assert!(matches!(
            aggregate(&clustering, &HashMap::new()),
            Err(Error::UnknownDocument(_))
        ));
    }
}
