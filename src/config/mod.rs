pub mod agent;
pub mod app;
pub mod defaults;
pub mod error;
pub mod extraction;
pub mod loader;
pub mod provider;
pub mod tool;

pub use crate::constants::CONFIG_PATH;

pub use agent::{AgentConfig, PromptEntry, SuperAgentConfig};
pub use app::AppConfig;
pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use provider::ProviderConfig;
pub use tool::{ToolConfig, ToolKind};
