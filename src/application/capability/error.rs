use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("capability '{name}' is already registered")]
    Duplicate { name: String },
    #[error("capability name must not be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{tool}' requires argument '{argument}'")]
    MissingArgument { tool: String, argument: String },
    #[error("tool '{tool}' got {value} for '{argument}', expected one of {allowed:?}")]
    InvalidArgument {
        tool: String,
        argument: String,
        value: String,
        allowed: Vec<String>,
    },
    #[error("request made by tool '{tool}' failed: {source}")]
    Http {
        tool: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("tool '{tool}' failed: {message}")]
    Execution { tool: String, message: String },
}
