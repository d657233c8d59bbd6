use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'max_loops' must be at least 1")]
    InvalidMaxLoops,

    #[error("extraction 'concurrency' must be at least 1")]
    InvalidConcurrency,

    #[error("extraction 'timeout_secs' must be at least 1")]
    InvalidTimeout,

    #[error("{kind} '{name}' is declared more than once")]
    Duplicate { kind: &'static str, name: String },

    #[error("agent '{agent}' has an empty prompt")]
    EmptyPrompt { agent: String },

    #[error("agent '{agent}' references unknown tool '{tool}'")]
    UnknownTool { agent: String, tool: String },

    #[error("super agent '{agent}' references unknown agent '{delegate}'")]
    UnknownAgent { agent: String, delegate: String },

    #[error("tool '{tool}' of kind preset_url is missing required field 'url'")]
    MissingUrl { tool: String },
}
