//! Shared invoke → parse → dispatch → accumulate loop.
//!
//! Both [`Agent`](super::Agent) and [`SuperAgent`](super::SuperAgent) drive
//! this engine; they differ only in the [`DelegateKind`] of the capabilities
//! they hold and in how a dispatch is carried out.

use super::errors::AgentError;
use super::recovery::recover;
use super::transcript::{AGENT_RESPONSE, AI_RESPONSE, TOOL_OUTPUT, Transcript, USER_MESSAGE};
use crate::model::{GenerationPort, GenerationRequest};
use crate::types::ChatMessage;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Returned when the model produced no candidate at all.
pub const NO_MODEL_RESPONSE: &str = "No response from the model.";
/// Returned when no parsed answer ever carried a `response` field.
pub const NO_RESPONSE_GENERATED: &str = "No response generated by the agent.";

pub(crate) const MISSING_COMPLETION_FLAG: &str =
    "Error checking for no_further_operations in LLM response.";

const COMPLETION_FLAG: &str = "no_further_operations";
const RESPONSE_FIELD: &str = "response";
const ARGS_FIELD: &str = "args";

/// What the capabilities in a loop's registry delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateKind {
    Tool,
    Agent,
}

impl DelegateKind {
    /// Key in the model's JSON that names the capability to invoke.
    pub fn selector(self) -> &'static str {
        match self {
            DelegateKind::Tool => "tool",
            DelegateKind::Agent => "agent",
        }
    }

    fn catalog_label(self) -> &'static str {
        match self {
            DelegateKind::Tool => "Available Tools",
            DelegateKind::Agent => "Available Agents",
        }
    }

    fn output_label(self) -> &'static str {
        match self {
            DelegateKind::Tool => TOOL_OUTPUT,
            DelegateKind::Agent => AGENT_RESPONSE,
        }
    }
}

/// How a loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model set the completion flag.
    Signal,
    /// Every iteration of the budget was used.
    Budget,
    /// The model returned no candidate.
    Empty,
}

/// Name and description shown to a delegating super agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    pub name: String,
    pub description: String,
}

impl AgentIdentity {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// State shared by both loop variants; the transcript lives as long as the
/// owning agent.
#[derive(Debug, Clone)]
pub(crate) struct LoopState {
    pub identity: AgentIdentity,
    pub model: String,
    pub preamble: Vec<String>,
    pub transcript: Transcript,
}

impl LoopState {
    pub fn new(identity: AgentIdentity, model: impl Into<String>, preamble: Vec<String>) -> Self {
        Self {
            identity,
            model: model.into(),
            preamble,
            transcript: Transcript::new(),
        }
    }
}

/// A capability invocation requested by the model.
pub(crate) struct DelegateCall<'a> {
    pub name: &'a str,
    pub args: &'a Value,
    /// The query the loop was started with.
    pub query: &'a str,
    /// Output of the delegate dispatched on the previous iteration.
    pub previous_output: Option<&'a str>,
}

/// Capability set a loop can dispatch into.
#[async_trait]
pub(crate) trait Delegates: Send {
    fn kind(&self) -> DelegateKind;

    fn catalog(&self) -> Vec<Value>;

    /// Run the named capability. Must not fail; problems come back as text.
    async fn delegate(&mut self, call: DelegateCall<'_>) -> String;
}

/// Result of one `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    pub response: String,
    pub termination: Termination,
    pub model_calls: usize,
}

/// `true` / `"true"` end the loop; any other value, or none, continues.
/// Returns `None` when the flag is absent.
pub(crate) fn completion_requested(value: &Value) -> Option<bool> {
    let flag = value.get(COMPLETION_FLAG)?;
    Some(match flag {
        Value::Bool(flag) => *flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn response_text(value: &Value) -> Option<String> {
    match value.get(RESPONSE_FIELD)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn render_catalog(kind: DelegateKind, catalog: Vec<Value>) -> String {
    let label = kind.catalog_label();
    if catalog.is_empty() {
        return format!("{label}: None");
    }
    let rendered = serde_json::to_string_pretty(&Value::Array(catalog)).unwrap_or_default();
    format!("{label}: {rendered}")
}

/// Drive the loop until the completion flag fires or `max_loops` model calls
/// have been made.
pub(crate) async fn run_loop<D>(
    state: &mut LoopState,
    port: &dyn GenerationPort,
    delegates: &mut D,
    query: &str,
    max_loops: usize,
) -> Result<LoopOutcome, AgentError>
where
    D: Delegates + ?Sized,
{
    if max_loops == 0 {
        return Err(AgentError::validation("max_loops must be at least 1"));
    }

    let kind = delegates.kind();
    let agent = state.identity.name.clone();
    let query_line = format!("Query: {query}");
    let catalog = render_catalog(kind, delegates.catalog());
    let system = state.preamble.join("\n");

    let mut remaining = max_loops;
    let mut model_calls = 0;
    let mut last_response: Option<String> = None;
    let mut previous_output: Option<String> = None;
    let mut termination = Termination::Budget;

    info!(agent = %agent, max_loops, "Agent loop started");

    while remaining > 0 {
        debug!(
            agent = %agent,
            remaining_loops = remaining,
            transcript_entries = state.transcript.len(),
            "Submitting agent turn to model provider"
        );
        let request = GenerationRequest::new(
            state.model.clone(),
            vec![
                ChatMessage::system(system.clone()),
                ChatMessage::user(query_line.clone()),
                ChatMessage::user(catalog.clone()),
                ChatMessage::user(state.transcript.render()),
            ],
        );
        let response = port.generate(request).await?;
        model_calls += 1;

        let Some(text) = response.text() else {
            warn!(agent = %agent, "No response from the model");
            return Ok(LoopOutcome {
                response: NO_MODEL_RESPONSE.to_string(),
                termination: Termination::Empty,
                model_calls,
            });
        };
        state.transcript.push(AI_RESPONSE, text);

        let mut iteration_output = None;
        let completion = match recover(text) {
            Ok(value) => {
                if let Some(name) = value.get(kind.selector()).and_then(Value::as_str) {
                    let args = value.get(ARGS_FIELD).unwrap_or(&Value::Null);
                    info!(agent = %agent, delegate = name, kind = ?kind, "Dispatching capability");
                    let output = delegates
                        .delegate(DelegateCall {
                            name,
                            args,
                            query,
                            previous_output: previous_output.as_deref(),
                        })
                        .await;
                    state.transcript.push(kind.output_label(), &output);
                    iteration_output = Some(output);
                }
                if let Some(answer) = response_text(&value) {
                    last_response = Some(answer);
                }
                completion_requested(&value)
            }
            Err(err) => {
                warn!(agent = %agent, error = %err, "Could not recover JSON from model response");
                None
            }
        };
        previous_output = iteration_output;
        remaining -= 1;

        match completion {
            Some(true) => {
                info!(agent = %agent, model_calls, "No further operations requested by the model");
                termination = Termination::Signal;
                break;
            }
            Some(false) => {}
            None => {
                warn!(
                    agent = %agent,
                    "no_further_operations not found in model response, continuing"
                );
                state.transcript.push(USER_MESSAGE, MISSING_COMPLETION_FLAG);
            }
        }
    }

    if termination == Termination::Budget {
        info!(agent = %agent, model_calls, "Agent loop budget exhausted");
    }

    let response = last_response.unwrap_or_else(|| {
        warn!(agent = %agent, "No response found in model output");
        NO_RESPONSE_GENERATED.to_string()
    });

    Ok(LoopOutcome {
        response,
        termination,
        model_calls,
    })
}
