use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the dataset file at startup.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("dataset file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset file must contain a JSON object keyed by dataset name")]
    NotAnObject,

    #[error("dataset {dataset:?}: {detail}")]
    InvalidValue { dataset: String, detail: String },
}

/// Request-scoped failures of a `/search` query. Every variant maps to a 400.
///
/// The `Display` text is the exact message returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("query should be a JSON object")]
    InvalidQueryShape,

    /// Raw parser message, surfaced verbatim.
    #[error("{0}")]
    Parse(String),

    #[error("\"{0}\" must be a string")]
    MissingOrInvalidField(&'static str),

    #[error("no data found for data target: {0}")]
    UnknownDataset(String),
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
