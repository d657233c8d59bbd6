//! Message adapters - convert prompt bundles to provider wire formats

use super::types::GenerationRequest;
use crate::types::{ChatMessage, DocumentHandle, MessageRole};
use serde_json::{Value, json};

/// Adapter for converting prompt bundles to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to Gemini format.
    /// Returns: (system_instruction_text, contents)
    ///
    /// All user messages are folded into a single user turn, one part per
    /// message, followed by the attachment reference if there is one.
    pub fn to_gemini_format(
        messages: &[ChatMessage],
        attachment: Option<&DocumentHandle>,
    ) -> (Option<String>, Vec<Value>) {
        let mut system_parts = Vec::new();
        let mut user_parts = Vec::new();

        for message in messages {
            match message.role {
                MessageRole::System => system_parts.push(message.content.clone()),
                MessageRole::User => user_parts.push(json!({ "text": message.content.clone() })),
            }
        }

        if let Some(handle) = attachment {
            user_parts.push(json!({
                "file_data": {
                    "mime_type": handle.mime_type,
                    "file_uri": handle.uri,
                }
            }));
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        let contents = if user_parts.is_empty() {
            Vec::new()
        } else {
            vec![json!({ "role": "user", "parts": user_parts })]
        };

        (system_instruction, contents)
    }

    /// Build the full `generateContent` payload for a request.
    pub fn to_gemini_payload(request: &GenerationRequest) -> Value {
        let (system_text, contents) =
            Self::to_gemini_format(&request.messages, request.attachment.as_ref());

        let mut payload = json!({ "contents": contents });

        let mut generation_config = serde_json::Map::new();
        if let Some(schema) = &request.response_schema {
            generation_config.insert("responseMimeType".into(), json!("application/json"));
            generation_config.insert("responseSchema".into(), schema.clone());
        }
        if let Some(tokens) = request.max_output_tokens {
            generation_config.insert("maxOutputTokens".into(), json!(tokens));
        }
        if !generation_config.is_empty() {
            payload["generationConfig"] = Value::Object(generation_config);
        }

        if let Some(system) = system_text {
            payload["system_instruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        payload
    }
}
