use crate::agent::ParseError;
use crate::model::ModelError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a single recipe pass produced no record.
#[derive(Debug, Error)]
pub enum PassError {
    #[error(transparent)]
    Generation(#[from] ModelError),
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("model returned no candidate")]
    Empty,
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("expected a non-empty JSON array")]
    NotAnArray,
    #[error("{recipe} record has an empty '{field}'")]
    Incomplete {
        recipe: &'static str,
        field: &'static str,
    },
    #[error("record does not match the {recipe} recipe: {source}")]
    Shape {
        recipe: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to upload {document:?}: {source}")]
    Upload {
        document: PathBuf,
        #[source]
        source: ModelError,
    },
    /// The metadata pass, which every record needs, did not succeed.
    #[error("cannot assemble record for {document}: metadata pass failed: {source}")]
    Assembly {
        document: String,
        #[source]
        source: PassError,
    },
    #[error("extraction task for {document:?} did not finish: {reason}")]
    TaskFailed { document: PathBuf, reason: String },
}

impl ExtractionError {
    pub fn is_assembly(&self) -> bool {
        matches!(self, ExtractionError::Assembly { .. })
    }
}
