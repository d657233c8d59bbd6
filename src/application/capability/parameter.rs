use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One entry of a tool's parameter contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    /// Semantic type shown to the model (`string`, `integer`, ...)
    #[serde(rename = "type")]
    pub semantic_type: String,
    pub required: bool,
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

impl ToolParameter {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        semantic_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            semantic_type: semantic_type.into(),
            required: true,
            allowed_values: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Catalog form, keyed externally by the parameter name.
    pub fn to_value(&self) -> Value {
        json!({
            "description": self.description,
            "type": self.semantic_type,
            "required": self.required,
            "allowed_values": self.allowed_values,
        })
    }

    /// Whether `value` satisfies the allowed-values restriction, if any.
    pub fn accepts(&self, value: &Value) -> bool {
        if self.allowed_values.is_empty() {
            return true;
        }
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        self.allowed_values.iter().any(|allowed| *allowed == rendered)
    }
}
