use super::engine::{
    AgentIdentity, DelegateCall, DelegateKind, Delegates, LoopOutcome, LoopState, run_loop,
};
use super::errors::AgentError;
use super::prompt::render_prompt;
use super::transcript::{PREVIOUS_AGENT_RESPONSE, Transcript};
use super::Executor;
use crate::application::capability::{Capability, Registry, Tool};
use crate::config::PromptEntry;
use crate::config::defaults::DEFAULT_MAX_LOOPS;
use crate::model::GenerationPort;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Agent that can call tools.
pub struct Agent {
    state: LoopState,
    tools: Registry<Arc<dyn Tool>>,
    port: Arc<dyn GenerationPort>,
    default_loops: usize,
}

impl Agent {
    pub fn new(
        identity: AgentIdentity,
        model: impl Into<String>,
        prompt: &[PromptEntry],
        tools: Registry<Arc<dyn Tool>>,
        port: Arc<dyn GenerationPort>,
    ) -> Result<Self, AgentError> {
        let preamble = render_prompt(prompt)?;
        Ok(Self {
            state: LoopState::new(identity, model, preamble),
            tools,
            port,
            default_loops: DEFAULT_MAX_LOOPS,
        })
    }

    /// Budget used when this agent runs as a delegate of a super agent.
    pub fn with_default_loops(mut self, loops: usize) -> Self {
        self.default_loops = loops;
        self
    }

    pub fn name(&self) -> &str {
        &self.state.identity.name
    }

    pub fn description(&self) -> &str {
        &self.state.identity.description
    }

    pub fn model(&self) -> &str {
        &self.state.model
    }

    pub fn default_loops(&self) -> usize {
        self.default_loops
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub fn preamble(&self) -> &[String] {
        &self.state.preamble
    }

    /// Run the loop and report how it ended.
    pub async fn run(&mut self, query: &str, max_loops: usize) -> Result<LoopOutcome, AgentError> {
        info!(agent = %self.state.identity.name, "Executing agent");
        run_loop(
            &mut self.state,
            self.port.as_ref(),
            &mut self.tools,
            query,
            max_loops,
        )
        .await
    }

    pub(crate) fn remember_previous_output(&mut self, output: &str) {
        self.state
            .transcript
            .push(PREVIOUS_AGENT_RESPONSE, output);
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.state.identity.name)
            .field("description", &self.state.identity.description)
            .field("model_name", &self.state.model)
            .finish()
    }
}

#[async_trait]
impl Executor for Agent {
    async fn execute(&mut self, query: &str, max_loops: usize) -> Result<String, AgentError> {
        self.run(query, max_loops)
            .await
            .map(|outcome| outcome.response)
    }

    /// Extends the preamble with more entries.
    fn load_prompt(&mut self, prompt: &[PromptEntry]) -> Result<(), AgentError> {
        let lines = render_prompt(prompt)?;
        self.state.preamble.extend(lines);
        Ok(())
    }
}

impl Capability for Agent {
    fn name(&self) -> &str {
        &self.state.identity.name
    }

    fn describe(&self) -> Value {
        json!({
            "name": self.state.identity.name,
            "description": self.state.identity.description,
            "model_name": self.state.model,
        })
    }
}

#[async_trait]
impl Delegates for Registry<Arc<dyn Tool>> {
    fn kind(&self) -> DelegateKind {
        DelegateKind::Tool
    }

    fn catalog(&self) -> Vec<Value> {
        Registry::catalog(self)
    }

    async fn delegate(&mut self, call: DelegateCall<'_>) -> String {
        self.dispatch(call.name, call.args).await
    }
}
