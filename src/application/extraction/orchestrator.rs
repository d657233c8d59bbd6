use super::errors::{ExtractionError, PassError};
use super::recipe::{CompositeRecord, ContentData, Metadata, Recipe, TablesAndFigures};
use crate::agent::recover;
use crate::config::ExtractionConfig;
use crate::model::{DocumentStore, GenerationPort, GenerationRequest};
use crate::types::{ChatMessage, DocumentHandle};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns one document into a [`CompositeRecord`] with one schema-constrained
/// generation call per recipe.
///
/// The document is uploaded once and every pass reuses the handle. Passes
/// run one after another.
pub struct ExtractionOrchestrator {
    port: Arc<dyn GenerationPort>,
    store: Arc<dyn DocumentStore>,
    config: ExtractionConfig,
}

impl ExtractionOrchestrator {
    pub fn new(
        port: Arc<dyn GenerationPort>,
        store: Arc<dyn DocumentStore>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            port,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub async fn extract(&self, path: &Path) -> Result<CompositeRecord, ExtractionError> {
        info!(document = %path.display(), "Uploading document");
        let handle = self
            .store
            .upload(path)
            .await
            .map_err(|source| ExtractionError::Upload {
                document: path.to_path_buf(),
                source,
            })?;
        debug!(document = %path.display(), uri = %handle.uri, "Document uploaded");
        self.extract_uploaded(&handle).await
    }

    /// Run every recipe pass against an already uploaded document.
    pub async fn extract_uploaded(
        &self,
        handle: &DocumentHandle,
    ) -> Result<CompositeRecord, ExtractionError> {
        let document = handle.source.display().to_string();

        info!(document = %document, recipe = Recipe::Metadata.name(), "Running extraction pass");
        let metadata = match self.metadata_pass(handle).await {
            Ok(metadata) => metadata,
            Err(source) => {
                warn!(document = %document, error = %source, "Metadata pass failed");
                return Err(ExtractionError::Assembly { document, source });
            }
        };
        let tables_and_figures = self
            .optional_pass::<TablesAndFigures>(Recipe::TablesAndFigures, handle, &document)
            .await;
        let content_data = self
            .optional_pass::<ContentData>(Recipe::Content, handle, &document)
            .await;

        info!(
            document = %document,
            has_tables_and_figures = tables_and_figures.is_some(),
            has_content_data = content_data.is_some(),
            "Extraction record assembled"
        );
        Ok(CompositeRecord::assemble(
            metadata,
            tables_and_figures,
            content_data,
        ))
    }

    async fn metadata_pass(&self, handle: &DocumentHandle) -> Result<Metadata, PassError> {
        let metadata: Metadata = self.run_pass(Recipe::Metadata, handle).await?;
        if metadata.title.trim().is_empty() {
            return Err(PassError::Incomplete {
                recipe: Recipe::Metadata.name(),
                field: "title",
            });
        }
        Ok(metadata)
    }

    async fn optional_pass<T: DeserializeOwned>(
        &self,
        recipe: Recipe,
        handle: &DocumentHandle,
        document: &str,
    ) -> Option<T> {
        info!(document = %document, recipe = recipe.name(), "Running extraction pass");
        match self.run_pass(recipe, handle).await {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    document = %document,
                    recipe = recipe.name(),
                    error = %err,
                    "Extraction pass failed, leaving field unset"
                );
                None
            }
        }
    }

    async fn run_pass<T: DeserializeOwned>(
        &self,
        recipe: Recipe,
        handle: &DocumentHandle,
    ) -> Result<T, PassError> {
        let request = GenerationRequest::new(
            self.config.model.clone(),
            vec![
                ChatMessage::user(format!("System: {}", self.config.system_prompt)),
                ChatMessage::user(format!("User: {}", self.config.user_prompt)),
            ],
        )
        .with_attachment(handle.clone())
        .with_response_schema(recipe.response_schema())
        .with_max_output_tokens(self.config.max_output_tokens);

        let limit = self.config.timeout();
        let response = timeout(limit, self.port.generate(request))
            .await
            .map_err(|_| PassError::Timeout(limit))??;
        let text = response.text().ok_or(PassError::Empty)?;

        let first = match recover(text)? {
            Value::Array(items) => items.into_iter().next().ok_or(PassError::NotAnArray)?,
            _ => return Err(PassError::NotAnArray),
        };
        serde_json::from_value(first).map_err(|source| PassError::Shape {
            recipe: recipe.name(),
            source,
        })
    }
}
