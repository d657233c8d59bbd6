use super::Executor;
use super::engine::{
    AgentIdentity, DelegateCall, DelegateKind, Delegates, LoopOutcome, LoopState, run_loop,
};
use super::errors::AgentError;
use super::prompt::render_prompt;
use super::runner::Agent;
use super::transcript::Transcript;
use crate::application::capability::Registry;
use crate::config::PromptEntry;
use crate::model::GenerationPort;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Agent whose capabilities are other agents.
///
/// Each delegation forwards the output of the delegate dispatched on the
/// previous iteration into the chosen agent's transcript before it runs.
pub struct SuperAgent {
    state: LoopState,
    agents: Registry<Agent>,
    port: Arc<dyn GenerationPort>,
}

impl SuperAgent {
    pub fn new(
        identity: AgentIdentity,
        model: impl Into<String>,
        prompt: &[PromptEntry],
        agents: Registry<Agent>,
        port: Arc<dyn GenerationPort>,
    ) -> Result<Self, AgentError> {
        let preamble = render_prompt(prompt)?;
        Ok(Self {
            state: LoopState::new(identity, model, preamble),
            agents,
            port,
        })
    }

    pub fn name(&self) -> &str {
        &self.state.identity.name
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub async fn run(&mut self, query: &str, max_loops: usize) -> Result<LoopOutcome, AgentError> {
        info!(agent = %self.state.identity.name, "Executing super agent");
        run_loop(
            &mut self.state,
            self.port.as_ref(),
            &mut self.agents,
            query,
            max_loops,
        )
        .await
    }
}

#[async_trait]
impl Executor for SuperAgent {
    async fn execute(&mut self, query: &str, max_loops: usize) -> Result<String, AgentError> {
        self.run(query, max_loops)
            .await
            .map(|outcome| outcome.response)
    }

    fn load_prompt(&mut self, prompt: &[PromptEntry]) -> Result<(), AgentError> {
        let lines = render_prompt(prompt)?;
        self.state.preamble.extend(lines);
        Ok(())
    }
}

#[async_trait]
impl Delegates for Registry<Agent> {
    fn kind(&self) -> DelegateKind {
        DelegateKind::Agent
    }

    fn catalog(&self) -> Vec<Value> {
        Registry::catalog(self)
    }

    async fn delegate(&mut self, call: DelegateCall<'_>) -> String {
        let Some(agent) = self.get_mut(call.name) else {
            warn!(requested_agent = %call.name, "Unknown agent requested by super agent");
            return format!("Agent '{}' not found in available agents.", call.name);
        };

        if let Some(previous) = call.previous_output {
            agent.remember_previous_output(previous);
        }
        let loops = agent.default_loops();
        info!(agent = %agent.name(), loops, "Invoking agent");
        match agent.run(call.query, loops).await {
            Ok(outcome) => outcome.response,
            Err(err) => {
                warn!(agent = %agent.name(), error = %err, "Delegated agent failed");
                format!("Error executing agent '{}': {err}", agent.name())
            }
        }
    }
}
