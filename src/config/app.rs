use super::agent::{AgentConfig, SuperAgentConfig};
use super::error::ConfigError;
use super::extraction::ExtractionConfig;
use super::provider::ProviderConfig;
use super::tool::ToolConfig;
use std::path::{Path, PathBuf};

/// Application configuration loaded from scholar.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    /// Default loop budget for agents
    pub max_loops: usize,
    /// Where uploaded documents are stored before extraction
    pub documents_dir: PathBuf,
    pub extraction: ExtractionConfig,
    pub tools: Vec<ToolConfig>,
    pub agents: Vec<AgentConfig>,
    pub super_agent: Option<SuperAgentConfig>,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text. Relative prompt files are resolved
    /// against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"), base_dir)
    }

    pub fn agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents
            .iter()
            .find(|agent| agent.name.eq_ignore_ascii_case(name))
    }
}
