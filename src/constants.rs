//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/scholar.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default Gemini media upload path
pub const DEFAULT_GEMINI_UPLOAD_PATH: &str = "upload/v1beta/files";
