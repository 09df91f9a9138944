use crate::{ClusterId, DocumentId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the vectorization, clustering and evaluation code.
#[derive(Debug, Error)]
pub enum Error {
    /// Two dense vectors were not expanded over the same vocabulary.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A line of an imported file could not be parsed.
    #[error("{path}:{line_number}: {reason}: {line:?}")]
    Parse {
        path: String,
        line_number: usize,
        line: String,
        reason: &'static str,
    },

    /// A required input file does not exist.
    #[error("missing input {}", .0.display())]
    MissingInput(PathBuf),

    #[error("document {0} appears more than once in the corpus")]
    DuplicateDocument(DocumentId),

    #[error("document {0} has no term vector")]
    UnknownDocument(DocumentId),

    /// A document was placed in a second cluster.
    #[error("document {document} assigned to cluster {second} but already in cluster {first}")]
    DoubleAssignment {
        document: DocumentId,
        first: ClusterId,
        second: ClusterId,
    },

    #[error("no link recorded for candidate cluster {0}")]
    MissingLink(ClusterId),

    /// The snapshot was written by an incompatible layout.
    #[error("unsupported snapshot version {found}, expected {expected}")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    /// A corpus file parsed as JSON but holds neither documents nor a document array.
    #[error("{} is not a document or an array of documents", .0.display())]
    MalformedCorpus(PathBuf),

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
