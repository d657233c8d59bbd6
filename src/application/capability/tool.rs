use super::error::ToolError;
use super::parameter::ToolParameter;
use super::registry::{Capability, Registry};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Name, description and parameter contract of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn to_value(&self) -> Value {
        let parameters: Map<String, Value> = self
            .parameters
            .iter()
            .map(|parameter| (parameter.name.clone(), parameter.to_value()))
            .collect();
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": parameters,
        })
    }

    /// Check the arguments the model supplied against the contract.
    pub fn check_arguments(&self, args: &Map<String, Value>) -> Result<(), ToolError> {
        for parameter in &self.parameters {
            match args.get(&parameter.name) {
                None | Some(Value::Null) if parameter.required => {
                    return Err(ToolError::MissingArgument {
                        tool: self.name.clone(),
                        argument: parameter.name.clone(),
                    });
                }
                Some(value) if !value.is_null() && !parameter.accepts(value) => {
                    return Err(ToolError::InvalidArgument {
                        tool: self.name.clone(),
                        argument: parameter.name.clone(),
                        value: value.to_string(),
                        allowed: parameter.allowed_values.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// An executable tool the agent loop can call.
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> &ToolSpec;

    async fn execute(&self, args: &Map<String, Value>) -> Result<String, ToolError>;
}

impl Capability for Arc<dyn Tool> {
    fn name(&self) -> &str {
        &self.spec().name
    }

    fn describe(&self) -> Value {
        self.spec().to_value()
    }
}

impl Registry<Arc<dyn Tool>> {
    /// Look the tool up case-insensitively and run it.
    ///
    /// Never fails: an unknown name or a failing tool produce a textual
    /// result the model sees on its next turn.
    pub async fn dispatch(&self, name: &str, args: &Value) -> String {
        let Some(tool) = self.get(name) else {
            warn!(requested_tool = %name, "Unknown tool requested by agent");
            return format!("Tool '{name}' not found in available tools.");
        };

        let empty = Map::new();
        let args = args.as_object().unwrap_or(&empty);
        let spec = tool.spec();
        let shown = Value::Object(args.clone());
        info!(tool = %spec.name, args = %shown, "Invoking tool");

        let result = match spec.check_arguments(args) {
            Ok(()) => tool.execute(args).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = %spec.name, error = %err, "Tool execution failed");
                format!("Error executing tool '{}': {err}", spec.name)
            }
        }
    }
}
