use super::defaults::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// One `key: text` line of an agent's preamble.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PromptEntry {
    pub key: String,
    pub text: String,
}

impl PromptEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    pub model: String,
    pub prompt: Vec<PromptEntry>,
    /// Names of the tools this agent may call
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SuperAgentConfig {
    pub name: String,
    pub description: String,
    pub model: String,
    pub prompt: Vec<PromptEntry>,
    /// Names of the agents this super agent may delegate to
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawAgent {
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: String,
    pub(super) model: Option<String>,
    #[serde(default)]
    pub(super) prompt: Vec<PromptEntry>,
    #[serde(default)]
    pub(super) tools: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawSuperAgent {
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: String,
    pub(super) model: Option<String>,
    #[serde(default)]
    pub(super) prompt: Vec<PromptEntry>,
    #[serde(default)]
    pub(super) agents: Vec<String>,
}

impl From<RawAgent> for AgentConfig {
    fn from(raw: RawAgent) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt: raw.prompt,
            tools: raw.tools,
        }
    }
}

impl From<RawSuperAgent> for SuperAgentConfig {
    fn from(raw: RawSuperAgent) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt: raw.prompt,
            agents: raw.agents,
        }
    }
}
