use super::CONFIG_PATH;
use super::agent::{AgentConfig, RawAgent, RawSuperAgent, SuperAgentConfig};
use super::defaults::{DEFAULT_DOCUMENTS_DIR, DEFAULT_MAX_LOOPS};
use super::error::ConfigError;
use super::extraction::{ExtractionConfig, RawExtractionConfig, RawPromptFile};
use super::provider::{ProviderConfig, RawProviderConfig};
use super::tool::{RawTool, ToolConfig, ToolKind};
use crate::constants::ENV_PATH;
use dotenvy::from_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub provider: Option<RawProviderConfig>,
    pub max_loops: Option<usize>,
    pub documents_dir: Option<String>,
    #[serde(default)]
    pub extraction: Option<RawExtractionConfig>,
    #[serde(default)]
    pub tools: Vec<RawTool>,
    #[serde(default)]
    pub agents: Vec<RawAgent>,
    #[serde(default)]
    pub super_agent: Option<RawSuperAgent>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    let content = read_file(config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&content, config_path, base_dir)
}

pub(super) fn parse_config(
    content: &str,
    origin: &Path,
    base_dir: &Path,
) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %origin.display(), "Parsing scholar configuration");
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed, base_dir)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn validate_and_build(parsed: RawConfig, base_dir: &Path) -> Result<super::AppConfig, ConfigError> {
    let max_loops = parsed.max_loops.unwrap_or(DEFAULT_MAX_LOOPS);
    if max_loops == 0 {
        return Err(ConfigError::InvalidMaxLoops);
    }

    let provider = parsed
        .provider
        .map(ProviderConfig::from)
        .unwrap_or_default();
    let extraction = build_extraction(parsed.extraction.unwrap_or_default(), base_dir)?;

    let tools: Vec<ToolConfig> = parsed.tools.into_iter().map(ToolConfig::from).collect();
    let mut tool_names = HashSet::new();
    for tool in &tools {
        if !tool_names.insert(tool.name.to_lowercase()) {
            return Err(ConfigError::Duplicate {
                kind: "tool",
                name: tool.name.clone(),
            });
        }
        if tool.kind == ToolKind::PresetUrl && tool.url.is_none() {
            return Err(ConfigError::MissingUrl {
                tool: tool.name.clone(),
            });
        }
    }

    let agents: Vec<AgentConfig> = parsed.agents.into_iter().map(AgentConfig::from).collect();
    let mut agent_names = HashSet::new();
    for agent in &agents {
        if !agent_names.insert(agent.name.to_lowercase()) {
            return Err(ConfigError::Duplicate {
                kind: "agent",
                name: agent.name.clone(),
            });
        }
        if agent.prompt.is_empty() {
            return Err(ConfigError::EmptyPrompt {
                agent: agent.name.clone(),
            });
        }
        if let Some(missing) = agent
            .tools
            .iter()
            .find(|tool| !tool_names.contains(&tool.to_lowercase()))
        {
            return Err(ConfigError::UnknownTool {
                agent: agent.name.clone(),
                tool: missing.clone(),
            });
        }
    }

    let super_agent = match parsed.super_agent.map(SuperAgentConfig::from) {
        Some(config) => {
            if config.prompt.is_empty() {
                return Err(ConfigError::EmptyPrompt {
                    agent: config.name.clone(),
                });
            }
            if let Some(missing) = config
                .agents
                .iter()
                .find(|name| !agent_names.contains(&name.to_lowercase()))
            {
                return Err(ConfigError::UnknownAgent {
                    agent: config.name.clone(),
                    delegate: missing.clone(),
                });
            }
            Some(config)
        }
        None => None,
    };

    Ok(super::AppConfig {
        provider,
        max_loops,
        documents_dir: PathBuf::from(
            parsed
                .documents_dir
                .unwrap_or_else(|| DEFAULT_DOCUMENTS_DIR.to_string()),
        ),
        extraction,
        tools,
        agents,
        super_agent,
    })
}

fn build_extraction(
    raw: RawExtractionConfig,
    base_dir: &Path,
) -> Result<ExtractionConfig, ConfigError> {
    let defaults = ExtractionConfig::default();

    let (file_system, file_user) = match raw.prompt_file.as_deref() {
        Some(file) => {
            let path = base_dir.join(file);
            let content = read_file(&path)?;
            let prompts: RawPromptFile =
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), "Loaded extraction prompts from file");
            (prompts.system, prompts.user)
        }
        None => (None, None),
    };

    let concurrency = raw.concurrency.unwrap_or(defaults.concurrency);
    if concurrency == 0 {
        return Err(ConfigError::InvalidConcurrency);
    }
    let timeout_secs = raw.timeout_secs.unwrap_or(defaults.timeout_secs);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }

    Ok(ExtractionConfig {
        model: raw.model.unwrap_or(defaults.model),
        system_prompt: raw
            .system
            .or(file_system)
            .unwrap_or(defaults.system_prompt),
        user_prompt: raw.user.or(file_user).unwrap_or(defaults.user_prompt),
        max_output_tokens: raw.max_output_tokens.unwrap_or(defaults.max_output_tokens),
        concurrency,
        timeout_secs,
    })
}
