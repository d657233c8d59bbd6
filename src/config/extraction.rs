use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_EXTRACTION_SYSTEM_PROMPT, DEFAULT_EXTRACTION_USER_PROMPT,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the recipe-driven document extraction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_output_tokens: u32,
    /// Documents processed at the same time by a batch
    pub concurrency: usize,
    /// Upper bound for a single generation call
    pub timeout_secs: u64,
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_EXTRACTION_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_EXTRACTION_USER_PROMPT.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawExtractionConfig {
    pub(super) model: Option<String>,
    /// Separate TOML file with `system` and `user` keys
    pub(super) prompt_file: Option<String>,
    pub(super) system: Option<String>,
    pub(super) user: Option<String>,
    pub(super) max_output_tokens: Option<u32>,
    pub(super) concurrency: Option<usize>,
    pub(super) timeout_secs: Option<u64>,
}

/// Contents of an extraction prompt file.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawPromptFile {
    pub(super) system: Option<String>,
    pub(super) user: Option<String>,
}
