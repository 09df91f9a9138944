//! Vectorization, first story detection and F-score evaluation of
//! event-detection clusterings.

use std::collections::{BTreeSet, HashMap};

pub mod aggregate;
pub mod clustering;
pub mod corpus;
pub mod error;
pub mod fscore;
pub mod fsd;
pub mod link;
pub mod matrix;
pub mod persist;
pub mod tokenizer;
pub mod vector;

pub type DocumentId = String;
pub type ClusterId = u32;
pub type Term = String;

/// Sparse term -> occurrence count mapping. Absent terms count as zero.
pub type TermVector = HashMap<Term, u64>;

/// All terms observed across one corpus slice, in a stable (sorted) order.
pub type Vocabulary = BTreeSet<Term>;

pub use aggregate::{aggregate, aggregate_present};
pub use clustering::{ClusterSeeds, Clustering};
pub use error::{Error, Result};
pub use fscore::{score, ClusterScore, ScoreReport};
pub use fsd::{FsdOutput, StreamingClusterer, DEFAULT_THRESHOLD};
pub use link::{Link, LinkTable, Linker, OverlapLinker, SimilarityLinker};
pub use matrix::{FrequencyMatrix, ThemeVectors};
pub use tokenizer::Analyzer;
pub use vector::VectorSpace;
