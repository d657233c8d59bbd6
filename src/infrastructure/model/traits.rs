//! Model traits

use super::types::{GenerationRequest, GenerationResponse, ModelError};
use crate::types::DocumentHandle;
use async_trait::async_trait;
use std::path::Path;

/// Port to the generative model.
///
/// Implementations must be safe to share between concurrently running tasks.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn generate(&self, request: GenerationRequest)
    -> Result<GenerationResponse, ModelError>;
}

/// Store that accepts a local document and hands back a reusable reference.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<DocumentHandle, ModelError>;
}
