//! # Provider Configuration
//!
//! Connection settings for the generative model service.
//!
//! ```toml
//! [provider]
//! id = "gemini"
//! endpoint = "https://generativelanguage.googleapis.com"
//! api_key = "GEMINI_API_KEY"   # name of the environment variable
//! ```

use super::defaults::{DEFAULT_API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_PROVIDER_ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Identifier used in logs and error messages
    pub id: String,
    /// API endpoint URL
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom generation path override (e.g., "v1beta/models")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    /// Custom media upload path override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_path: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROVIDER_ID.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_API_KEY_ENV.to_string()),
            api_path: None,
            upload_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: Option<String>,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) upload_path: Option<String>,
}

impl From<RawProviderConfig> for ProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        let defaults = ProviderConfig::default();
        Self {
            id: raw.id.unwrap_or(defaults.id),
            endpoint: raw.endpoint.unwrap_or(defaults.endpoint),
            api_key: raw.api_key.or(defaults.api_key),
            api_path: raw.api_path,
            upload_path: raw.upload_path,
        }
    }
}
