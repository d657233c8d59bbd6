//! Provider factory - creates clients from config

use super::clients::GeminiClient;
use crate::config::ProviderConfig;
use std::env;
use std::sync::Arc;
use tracing::warn;

/// Resolve API key from environment variable
pub fn resolve_api_key(provider: &str, env_var: Option<&str>) -> Option<String> {
    let Some(raw) = env_var.map(str::trim) else {
        return None;
    };
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates the shared client. The returned handle serves both as the
    /// generation port and the document store, and is safe to clone into
    /// concurrently running tasks since `reqwest::Client` pools connections
    /// internally.
    pub fn create(config: &ProviderConfig) -> Arc<GeminiClient> {
        Arc::new(GeminiClient::from_config(config))
    }
}
