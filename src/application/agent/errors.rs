use crate::application::capability::RegistryError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Generation(#[from] ModelError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl AgentError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn user_message(&self) -> String {
        match self {
            AgentError::Validation(message) => format!("Invalid agent input: {message}"),
            AgentError::Generation(err) => err.user_message(),
            AgentError::Registry(err) => format!("Agent setup failed: {err}"),
        }
    }
}
