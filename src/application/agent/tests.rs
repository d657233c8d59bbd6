use super::engine::MISSING_COMPLETION_FLAG;
use super::*;
use crate::application::capability::{
    Registry, Tool, ToolError, ToolParameter, ToolSpec,
};
use crate::config::PromptEntry;
use crate::model::{GenerationPort, GenerationRequest, GenerationResponse, ModelError};
use crate::types::MessageRole;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct ScriptedPort {
    responses: Arc<Mutex<VecDeque<Result<GenerationResponse, ModelError>>>>,
    recordings: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedPort {
    fn new(responses: Vec<&str>) -> Self {
        let port = Self::default();
        {
            let mut queue = port.responses.try_lock().expect("fresh lock");
            for response in responses {
                queue.push_back(Ok(GenerationResponse::new(vec![response.to_string()])));
            }
        }
        port
    }

    async fn push(&self, response: Result<GenerationResponse, ModelError>) {
        self.responses.lock().await.push_back(response);
    }

    async fn requests(&self) -> Vec<GenerationRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl GenerationPort for ScriptedPort {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ModelError> {
        self.recordings.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(GenerationResponse::default()))
    }
}

struct EchoTool {
    spec: ToolSpec,
    calls: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl EchoTool {
    fn new(name: &str) -> Self {
        Self {
            spec: ToolSpec::new(name, "Echo the text argument")
                .with_parameter(ToolParameter::new("text", "Text to echo", "string"))
                .with_parameter(
                    ToolParameter::new("mode", "Echo mode", "string")
                        .optional()
                        .with_allowed_values(["plain", "upper"]),
                ),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
        self.calls.lock().await.push(args.clone());
        let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
        match args.get("mode").and_then(Value::as_str) {
            Some("upper") => Ok(format!("echo: {}", text.to_uppercase())),
            _ => Ok(format!("echo: {text}")),
        }
    }
}

struct FailingTool {
    spec: ToolSpec,
}

#[async_trait]
impl Tool for FailingTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, _args: &Map<String, Value>) -> Result<String, ToolError> {
        Err(ToolError::Execution {
            tool: self.spec.name.clone(),
            message: "backend exploded".into(),
        })
    }
}

fn prompt() -> Vec<PromptEntry> {
    vec![
        PromptEntry::new("role", "You are a research assistant."),
        PromptEntry::new("output_format", "Reply with JSON."),
    ]
}

fn agent_with_tools(port: &ScriptedPort, tools: Vec<Arc<dyn Tool>>) -> Agent {
    Agent::new(
        AgentIdentity::new("researcher", "Finds things out"),
        "gemini-test",
        &prompt(),
        Registry::try_from_iter(tools).expect("registry"),
        Arc::new(port.clone()),
    )
    .expect("agent")
}

fn bare_agent(port: &ScriptedPort) -> Agent {
    agent_with_tools(port, Vec::new())
}

#[tokio::test]
async fn string_completion_flag_terminates_loop() {
    let port = ScriptedPort::new(vec![r#"{"no_further_operations": "true", "response": "done"}"#]);
    let mut agent = bare_agent(&port);

    let outcome = agent.run("hello", 3).await.expect("agent succeeds");

    assert_eq!(outcome.response, "done");
    assert_eq!(outcome.termination, Termination::Signal);
    assert_eq!(outcome.model_calls, 1);
    assert_eq!(port.requests().await.len(), 1);
}

#[tokio::test]
async fn boolean_completion_flag_terminates_loop() {
    let port = ScriptedPort::new(vec![r#"{"no_further_operations": true, "response": "done"}"#]);
    let mut agent = bare_agent(&port);

    let response = agent.execute("hello", 3).await.expect("agent succeeds");

    assert_eq!(response, "done");
    assert_eq!(port.requests().await.len(), 1);
}

#[tokio::test]
async fn loop_never_exceeds_budget() {
    for budget in 1..=4 {
        let answers = vec![r#"{"response": "thinking", "no_further_operations": false}"#; 10];
        let port = ScriptedPort::new(answers);
        let mut agent = bare_agent(&port);

        let outcome = agent.run("keep going", budget).await.expect("agent succeeds");

        assert_eq!(outcome.model_calls, budget);
        assert_eq!(outcome.termination, Termination::Budget);
        assert_eq!(outcome.response, "thinking");
        assert_eq!(port.requests().await.len(), budget);
    }
}

#[tokio::test]
async fn zero_budget_is_rejected() {
    let port = ScriptedPort::new(Vec::new());
    let mut agent = bare_agent(&port);

    let err = agent.execute("hello", 0).await.expect_err("invalid budget");
    assert!(matches!(err, AgentError::Validation(_)));
    assert!(port.requests().await.is_empty());
}

#[tokio::test]
async fn tool_lookup_is_case_insensitive_and_output_is_recorded() {
    let port = ScriptedPort::new(vec![
        r#"{"tool": "ECHO", "args": {"text": "hi", "mode": "upper"}, "no_further_operations": false}"#,
        r#"{"response": "it said HI", "no_further_operations": true}"#,
    ]);
    let echo = Arc::new(EchoTool::new("Echo"));
    let calls = echo.calls.clone();
    let mut agent = agent_with_tools(&port, vec![echo as Arc<dyn Tool>]);

    let response = agent.execute("say hi", 3).await.expect("agent succeeds");

    assert_eq!(response, "it said HI");
    assert_eq!(calls.lock().await.len(), 1);
    assert!(
        agent
            .transcript()
            .entries()
            .iter()
            .any(|entry| entry == "Tool Output: echo: HI")
    );

    let requests = port.requests().await;
    let second_history = &requests[1].messages[3].content;
    assert!(second_history.contains("Tool Output: echo: HI"));
}

#[tokio::test]
async fn unknown_tool_is_reported_not_raised() {
    let port = ScriptedPort::new(vec![
        r#"{"tool": "teleport", "args": {}, "no_further_operations": false}"#,
        r#"{"response": "cannot", "no_further_operations": true}"#,
    ]);
    let mut agent = agent_with_tools(&port, vec![Arc::new(EchoTool::new("echo")) as Arc<dyn Tool>]);

    let response = agent.execute("go", 3).await.expect("agent succeeds");

    assert_eq!(response, "cannot");
    assert!(
        agent
            .transcript()
            .entries()
            .iter()
            .any(|entry| entry.contains("Tool 'teleport' not found in available tools."))
    );
}

#[tokio::test]
async fn failing_tool_becomes_text_and_loop_continues() {
    let port = ScriptedPort::new(vec![
        r#"{"tool": "broken", "no_further_operations": false}"#,
        r#"{"response": "recovered", "no_further_operations": true}"#,
    ]);
    let broken: Arc<dyn Tool> = Arc::new(FailingTool {
        spec: ToolSpec::new("broken", "Always fails"),
    });
    let mut agent = agent_with_tools(&port, vec![broken]);

    let response = agent.execute("try", 3).await.expect("agent succeeds");

    assert_eq!(response, "recovered");
    assert!(
        agent
            .transcript()
            .entries()
            .iter()
            .any(|entry| entry.contains("Error executing tool 'broken'")
                && entry.contains("backend exploded"))
    );
}

#[tokio::test]
async fn argument_contract_violations_do_not_reach_the_tool() {
    let port = ScriptedPort::new(vec![
        r#"{"tool": "echo", "args": {"mode": "upper"}, "no_further_operations": false}"#,
        r#"{"tool": "echo", "args": {"text": "x", "mode": "shout"}, "no_further_operations": false}"#,
        r#"{"response": "gave up", "no_further_operations": true}"#,
    ]);
    let echo = Arc::new(EchoTool::new("echo"));
    let calls = echo.calls.clone();
    let mut agent = agent_with_tools(&port, vec![echo as Arc<dyn Tool>]);

    agent.execute("echo", 3).await.expect("agent succeeds");

    assert!(calls.lock().await.is_empty());
    let entries = agent.transcript().entries();
    assert!(entries.iter().any(|e| e.contains("requires argument 'text'")));
    assert!(entries.iter().any(|e| e.contains("expected one of")));
}

#[tokio::test]
async fn fenced_response_is_recovered() {
    let port = ScriptedPort::new(vec![
        "```json\n{\"response\": \"fenced\", \"no_further_operations\": true}\n```",
    ]);
    let mut agent = bare_agent(&port);

    assert_eq!(agent.execute("q", 3).await.expect("agent succeeds"), "fenced");
}

#[tokio::test]
async fn unparseable_iteration_does_not_hide_later_success() {
    let port = ScriptedPort::new(vec![
        "I will now call a tool",
        r#"{"response": "second try", "no_further_operations": true}"#,
    ]);
    let mut agent = bare_agent(&port);

    let outcome = agent.run("q", 3).await.expect("agent succeeds");

    assert_eq!(outcome.response, "second try");
    assert_eq!(outcome.model_calls, 2);
    assert_eq!(
        agent.transcript().entries()[..2],
        [
            "AI Response: I will now call a tool".to_string(),
            format!("User Message: {MISSING_COMPLETION_FLAG}"),
        ]
    );
}

#[tokio::test]
async fn missing_flag_is_logged_into_transcript_and_loop_continues() {
    let port = ScriptedPort::new(vec![
        r#"{"response": "partial"}"#,
        r#"{"response": "complete", "no_further_operations": "true"}"#,
    ]);
    let mut agent = bare_agent(&port);

    let outcome = agent.run("q", 3).await.expect("agent succeeds");

    assert_eq!(outcome.response, "complete");
    assert_eq!(outcome.model_calls, 2);
    assert!(
        agent
            .transcript()
            .entries()
            .contains(&format!("User Message: {MISSING_COMPLETION_FLAG}"))
    );
}

#[tokio::test]
async fn empty_candidates_return_sentinel() {
    let port = ScriptedPort::default();
    port.push(Ok(GenerationResponse::default())).await;
    let mut agent = bare_agent(&port);

    let outcome = agent.run("q", 3).await.expect("no error on empty");

    assert_eq!(outcome.response, NO_MODEL_RESPONSE);
    assert_eq!(outcome.termination, Termination::Empty);
    assert!(agent.transcript().is_empty());
}

#[tokio::test]
async fn missing_response_field_returns_sentinel() {
    let port = ScriptedPort::new(vec![r#"{"no_further_operations": true}"#]);
    let mut agent = bare_agent(&port);

    let response = agent.execute("q", 3).await.expect("agent succeeds");

    assert_eq!(response, NO_RESPONSE_GENERATED);
}

#[tokio::test]
async fn generation_failure_propagates() {
    let port = ScriptedPort::default();
    port.push(Err(ModelError::missing_api_key("gemini"))).await;
    let mut agent = bare_agent(&port);

    let err = agent.execute("q", 3).await.expect_err("generation fails");

    assert!(matches!(
        err,
        AgentError::Generation(ModelError::MissingApiKey { .. })
    ));
}

#[tokio::test]
async fn transcript_only_grows_across_iterations_and_calls() {
    let port = ScriptedPort::new(vec![
        r#"{"response": "a", "no_further_operations": false}"#,
        r#"{"response": "b", "no_further_operations": true}"#,
        r#"{"response": "c", "no_further_operations": true}"#,
    ]);
    let mut agent = bare_agent(&port);

    agent.execute("first", 3).await.expect("first call");
    let after_first = agent.transcript().entries().to_vec();
    agent.execute("second", 3).await.expect("second call");
    let after_second = agent.transcript().entries();

    assert!(after_second.len() > after_first.len());
    assert_eq!(&after_second[..after_first.len()], after_first.as_slice());

    let histories: Vec<usize> = port
        .requests()
        .await
        .iter()
        .map(|request| request.messages[3].content.lines().count())
        .collect();
    assert!(histories.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn request_carries_preamble_query_catalog_and_history() {
    let port = ScriptedPort::new(vec![r#"{"response": "ok", "no_further_operations": true}"#]);
    let mut agent = agent_with_tools(&port, vec![Arc::new(EchoTool::new("echo")) as Arc<dyn Tool>]);

    agent.execute("what is rust", 1).await.expect("agent succeeds");

    let requests = port.requests().await;
    let messages = &requests[0].messages;
    assert_eq!(requests[0].model, "gemini-test");
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(
        messages[0].content,
        "Role: You are a research assistant.\nOutput_Format: Reply with JSON."
    );
    assert_eq!(messages[1].content, "Query: what is rust");
    assert!(messages[2].content.starts_with("Available Tools: ["));
    assert!(messages[2].content.contains("\"allowed_values\""));
    assert_eq!(messages[3].content, "Message History: ");
    assert!(requests[0].response_schema.is_none());
}

#[tokio::test]
async fn empty_tool_catalog_is_marked_none() {
    let port = ScriptedPort::new(vec![r#"{"response": "ok", "no_further_operations": true}"#]);
    let mut agent = bare_agent(&port);

    agent.execute("q", 1).await.expect("agent succeeds");

    assert_eq!(port.requests().await[0].messages[2].content, "Available Tools: None");
}

#[tokio::test]
async fn load_prompt_extends_preamble() {
    let port = ScriptedPort::new(Vec::new());
    let mut agent = bare_agent(&port);

    agent
        .load_prompt(&[PromptEntry::new("constraints", "Be brief.")])
        .expect("prompt loads");

    assert_eq!(agent.preamble().len(), 3);
    assert_eq!(agent.preamble()[2], "Constraints: Be brief.");
    assert!(matches!(agent.load_prompt(&[]), Err(AgentError::Validation(_))));
}

#[test]
fn empty_prompt_rejects_agent() {
    let port = ScriptedPort::new(Vec::new());
    let result = Agent::new(
        AgentIdentity::new("a", "b"),
        "m",
        &[],
        Registry::new(),
        Arc::new(port),
    );
    assert!(matches!(result, Err(AgentError::Validation(_))));
}

fn super_agent(port: &ScriptedPort, delegates: Vec<Agent>) -> SuperAgent {
    SuperAgent::new(
        AgentIdentity::new("coordinator", "Routes work"),
        "gemini-test",
        &[PromptEntry::new("role", "Delegate to the best agent.")],
        Registry::try_from_iter(delegates).expect("registry"),
        Arc::new(port.clone()),
    )
    .expect("super agent")
}

#[tokio::test]
async fn super_agent_forwards_previous_delegate_output() {
    let port = ScriptedPort::new(vec![
        // coordinator, iteration 1
        r#"{"agent": "writer", "no_further_operations": false}"#,
        // writer, first delegation
        r#"{"response": "draft 1", "no_further_operations": true}"#,
        // coordinator, iteration 2
        r#"{"agent": "WRITER", "no_further_operations": false}"#,
        // writer, second delegation
        r#"{"response": "draft 2", "no_further_operations": true}"#,
        // coordinator, iteration 3
        r#"{"response": "final", "no_further_operations": "true"}"#,
    ]);
    let writer = Agent::new(
        AgentIdentity::new("Writer", "Writes drafts"),
        "gemini-test",
        &prompt(),
        Registry::new(),
        Arc::new(port.clone()),
    )
    .expect("writer")
    .with_default_loops(2);
    let mut coordinator = super_agent(&port, vec![writer]);

    let response = coordinator
        .execute("write a summary", 3)
        .await
        .expect("super agent succeeds");

    assert_eq!(response, "final");

    let writer = coordinator.agent("writer").expect("writer registered");
    let entries = writer.transcript().entries();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].starts_with("AI Response: "));
    assert_eq!(entries[1], "Previous Agent Response: draft 1");
    assert!(entries[2].contains("draft 2"));

    let coordinator_entries = coordinator.transcript().entries();
    assert!(coordinator_entries.contains(&"Agent Response: draft 1".to_string()));
    assert!(coordinator_entries.contains(&"Agent Response: draft 2".to_string()));

    let requests = port.requests().await;
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[1].messages[1].content, "Query: write a summary");
    assert!(requests[3].messages[3].content.contains("Previous Agent Response: draft 1"));
    assert!(requests[0].messages[2].content.starts_with("Available Agents: ["));
    assert!(requests[0].messages[2].content.contains("\"model_name\""));
}

#[tokio::test]
async fn super_agent_reports_unknown_agent() {
    let port = ScriptedPort::new(vec![
        r#"{"agent": "ghost", "no_further_operations": false}"#,
        r#"{"response": "nobody home", "no_further_operations": true}"#,
    ]);
    let mut coordinator = super_agent(&port, Vec::new());

    let response = coordinator.execute("q", 3).await.expect("super agent succeeds");

    assert_eq!(response, "nobody home");
    assert!(
        coordinator
            .transcript()
            .entries()
            .iter()
            .any(|entry| entry.contains("Agent 'ghost' not found in available agents."))
    );
    assert_eq!(port.requests().await[0].messages[2].content, "Available Agents: None");
}

#[tokio::test]
async fn super_agent_ignores_tool_selector() {
    let port = ScriptedPort::new(vec![
        r#"{"tool": "echo", "response": "no tools here", "no_further_operations": true}"#,
    ]);
    let mut coordinator = super_agent(&port, Vec::new());

    let response = coordinator.execute("q", 3).await.expect("super agent succeeds");

    assert_eq!(response, "no tools here");
    assert_eq!(coordinator.transcript().len(), 1);
}

#[test]
fn user_message_describes_failure_for_operators() {
    let missing_key = AgentError::from(ModelError::missing_api_key("gemini"));
    assert_eq!(
        missing_key.user_message(),
        "Provider 'gemini' needs an API key. Check the configured env var."
    );
    assert_eq!(
        AgentError::validation("prompt must not be empty").user_message(),
        "Invalid agent input: prompt must not be empty"
    );
}
