use super::engine::AgentIdentity;
use super::errors::AgentError;
use super::runner::Agent;
use super::super_agent::SuperAgent;
use crate::application::capability::builtin::build_tools;
use crate::application::capability::{Capability, Registry, Tool};
use crate::config::{AgentConfig, AppConfig, SuperAgentConfig};
use crate::model::GenerationPort;
use std::sync::Arc;
use tracing::debug;

/// Builds agents and the super agent from configuration.
pub struct AgentFactory {
    tools: Vec<Arc<dyn Tool>>,
    agents: Vec<AgentConfig>,
    super_agent: Option<SuperAgentConfig>,
    default_loops: usize,
    port: Arc<dyn GenerationPort>,
}

impl AgentFactory {
    pub fn new(config: &AppConfig, port: Arc<dyn GenerationPort>) -> Self {
        Self {
            tools: build_tools(&config.tools),
            agents: config.agents.clone(),
            super_agent: config.super_agent.clone(),
            default_loops: config.max_loops,
            port,
        }
    }

    /// Replace the configured tool pool, e.g. with custom tools.
    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn agent(&self, name: &str) -> Result<Agent, AgentError> {
        let config = self
            .agents
            .iter()
            .find(|agent| agent.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AgentError::validation(format!("agent '{name}' is not configured")))?;
        self.build_agent(config)
    }

    pub fn super_agent(&self) -> Result<SuperAgent, AgentError> {
        let config = self
            .super_agent
            .as_ref()
            .ok_or_else(|| AgentError::validation("no super agent is configured"))?;

        let mut agents = Registry::new();
        for name in &config.agents {
            agents.insert(self.agent(name)?)?;
        }

        debug!(agent = %config.name, delegates = agents.len(), "Built super agent");
        SuperAgent::new(
            AgentIdentity::new(config.name.clone(), config.description.clone()),
            config.model.clone(),
            &config.prompt,
            agents,
            self.port.clone(),
        )
    }

    fn build_agent(&self, config: &AgentConfig) -> Result<Agent, AgentError> {
        let mut tools = Registry::new();
        for name in &config.tools {
            let tool = self
                .tools
                .iter()
                .find(|tool| tool.name().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    AgentError::validation(format!(
                        "agent '{}' references unknown tool '{name}'",
                        config.name
                    ))
                })?;
            tools.insert(tool.clone())?;
        }

        debug!(agent = %config.name, tools = tools.len(), "Built agent");
        Ok(Agent::new(
            AgentIdentity::new(config.name.clone(), config.description.clone()),
            config.model.clone(),
            &config.prompt,
            tools,
            self.port.clone(),
        )?
        .with_default_loops(self.default_loops))
    }
}
