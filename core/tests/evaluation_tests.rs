use evalcore::link::{Link, Linker, OverlapLinker, SimilarityLinker};
use evalcore::{
    score, Analyzer, Clustering, DocumentId, Error, LinkTable, TermVector, ThemeVectors, Vocabulary,
};
use std::collections::{BTreeMap, HashMap};

fn real() -> Clustering {
    Clustering::from_pairs([(1, "a"), (1, "b"), (1, "c"), (2, "d"), (2, "e")]).unwrap()
}

#[test]
fn overlap_links_to_largest_shared_cluster() {
    let candidate = Clustering::from_pairs([(10, "a"), (10, "b"), (11, "d")]).unwrap();
    let links = OverlapLinker.link(&real(), &candidate).unwrap();
    assert_eq!(links[&10], Link::Linked(1));
    assert_eq!(links[&11], Link::Linked(2));
}

#[test]
fn zero_overlap_is_unlinked_not_stale() {
    // Cluster 11 follows a linked cluster and shares nothing with the ground truth
    let candidate = Clustering::from_pairs([(10, "a"), (11, "x"), (11, "y"), (12, "e")]).unwrap();
    let links = OverlapLinker.link(&real(), &candidate).unwrap();
    assert_eq!(links[&10], Link::Linked(1));
    assert_eq!(links[&11], Link::Unlinked);
    assert_eq!(links[&12], Link::Linked(2));

    let report = score(&real(), &candidate, &links).unwrap();
    assert_eq!(report.f_score(11), Some(0.0));
}

#[test]
fn overlap_prefers_strict_maximum() {
    let candidate = Clustering::from_pairs([(1, "a"), (1, "d"), (1, "e")]).unwrap();
    let links = OverlapLinker.link(&real(), &candidate).unwrap();
    assert_eq!(links[&1], Link::Linked(2));
}

#[test]
fn f_score_worked_example() {
    let candidate = Clustering::from_pairs([(10, "a"), (10, "b")]).unwrap();
    let links = LinkTable::from([(10, Link::Linked(1))]);
    let report = score(&real(), &candidate, &links).unwrap();
    let s = &report.clusters[&10];
    assert_eq!(s.correct, 2);
    assert_eq!(s.precision, 1.0);
    assert!((s.recall - 2.0 / 3.0).abs() < 1e-12);
    assert!((s.f_score - 0.8).abs() < 1e-12);
    assert!((report.accuracy - 0.8).abs() < 1e-12);
}

#[test]
fn accuracy_is_unweighted_mean() {
    let real = Clustering::from_pairs([(1, "a"), (2, "b"), (2, "c"), (2, "d"), (2, "e")]).unwrap();
    // Cluster 1 is a perfect single document, cluster 2 is four documents that match nothing
    let candidate =
        Clustering::from_pairs([(1, "a"), (2, "w"), (2, "x"), (2, "y"), (2, "z")]).unwrap();
    let links = OverlapLinker.link(&real, &candidate).unwrap();
    let report = score(&real, &candidate, &links).unwrap();
    assert_eq!(report.f_score(1), Some(1.0));
    assert_eq!(report.f_score(2), Some(0.0));
    assert_eq!(report.accuracy, 0.5);
    assert_eq!(report.cluster_count(), 2);
}

#[test]
fn linked_but_disjoint_scores_zero() {
    let candidate = Clustering::from_pairs([(5, "d")]).unwrap();
    let links = LinkTable::from([(5, Link::Linked(1))]);
    let report = score(&real(), &candidate, &links).unwrap();
    assert_eq!(report.clusters[&5].f_score, 0.0);
}

#[test]
fn missing_link_is_an_error() {
    let candidate = Clustering::from_pairs([(5, "d")]).unwrap();
    assert!(matches!(
        score(&real(), &candidate, &LinkTable::new()),
        Err(Error::MissingLink(5))
    ));
}

#[test]
fn empty_candidate_scores_zero() {
    let report = score(&real(), &Clustering::new(), &LinkTable::new()).unwrap();
    assert_eq!(report.accuracy, 0.0);
    assert_eq!(report.cluster_count(), 0);
}

fn documents() -> HashMap<DocumentId, TermVector> {
    let analyzer = Analyzer::default();
    [
        ("a", "earthquake hits chile"),
        ("b", "strong earthquake in chile"),
        ("c", "chile earthquake death toll"),
        ("d", "cup final tonight"),
        ("e", "final whistle cup won"),
        ("x", "random lunch photo"),
    ]
    .iter()
    .map(|(id, text)| (id.to_string(), analyzer.term_vector(text)))
    .collect()
}

#[test]
fn similarity_links_aggregates_to_themes() {
    let themes = BTreeMap::from([
        (1, "Chile earthquake".to_string()),
        (2, "Cup final".to_string()),
    ]);
    let themes = ThemeVectors::from_themes(&themes, &Analyzer::default());
    let docs = documents();
    let linker = SimilarityLinker::new(&themes.vocabulary, &docs, themes.vectors.clone());

    let candidate = Clustering::from_pairs([(1, "d"), (1, "e"), (2, "a"), (2, "b"), (3, "x")]).unwrap();
    let links = linker.link(&real(), &candidate).unwrap();
    assert_eq!(links[&1], Link::Linked(2));
    assert_eq!(links[&2], Link::Linked(1));
    // No theme term at all: all-zero over the theme vocabulary
    assert_eq!(links[&3], Link::Unlinked);
}

#[test]
fn similarity_links_against_real_aggregates() {
    let docs = documents();
    let vocab: Vocabulary = docs.values().flat_map(|v| v.keys().cloned()).collect();
    let linker = SimilarityLinker::from_real_clustering(&vocab, &docs, &real());
    let candidate = Clustering::from_pairs([(7, "c"), (8, "e")]).unwrap();
    let links = linker.link(&real(), &candidate).unwrap();
    assert_eq!(links[&7], Link::Linked(1));
    assert_eq!(links[&8], Link::Linked(2));
}
