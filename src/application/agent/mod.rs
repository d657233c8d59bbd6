//! # Agent Module
//!
//! Agents that iteratively query the generative model, call tools or other
//! agents on its behalf, and accumulate everything they see in an
//! append-only transcript.
//!
//! ## Key Types
//!
//! - [`Agent`] - loop whose capabilities are tools
//! - [`SuperAgent`] - loop whose capabilities are other agents
//! - [`Executor`] - what both expose to callers
//! - [`AgentFactory`] - builds agents from configuration
//!
//! ## Agent Loop
//!
//! 1. Send preamble, query, capability catalog and transcript to the model
//! 2. Record the raw answer and recover JSON from it
//! 3. If a `tool` / `agent` is named, dispatch it and record its output
//! 4. Stop when `no_further_operations` is true or the budget is spent

mod builder;
mod engine;
mod errors;
mod prompt;
mod recovery;
mod runner;
mod super_agent;
mod transcript;

#[cfg(test)]
mod tests;

pub use builder::AgentFactory;
pub use engine::{
    AgentIdentity, DelegateKind, LoopOutcome, NO_MODEL_RESPONSE, NO_RESPONSE_GENERATED,
    Termination,
};
pub use errors::AgentError;
pub use prompt::render_prompt;
pub use recovery::{ParseError, recover};
pub use runner::Agent;
pub use super_agent::SuperAgent;
pub use transcript::Transcript;

use crate::config::PromptEntry;
use async_trait::async_trait;

/// Operations shared by [`Agent`] and [`SuperAgent`].
#[async_trait]
pub trait Executor: Send {
    /// Run the loop for `query` with at most `max_loops` model calls and
    /// return the final `response` text, or one of the sentinel strings.
    async fn execute(&mut self, query: &str, max_loops: usize) -> Result<String, AgentError>;

    fn load_prompt(&mut self, prompt: &[PromptEntry]) -> Result<(), AgentError>;
}
