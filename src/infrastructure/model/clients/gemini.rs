//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_UPLOAD_PATH};
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::{DocumentStore, GenerationPort};
use crate::infrastructure::model::types::{GenerationRequest, GenerationResponse, ModelError};
use crate::types::DocumentHandle;

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
    upload_path: String,
}

impl GeminiClient {
    pub fn from_config(config: &ProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            upload_path: config
                .upload_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_UPLOAD_PATH.to_string()),
        }
    }

    fn build_model_url(&self, model: &str) -> String {
        self.base
            .build_url(&format!("{}/{model}:generateContent", self.api_path))
    }
}

/// Guess the MIME type the file store expects from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl GenerationPort for GeminiClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ModelError> {
        let url = self.build_model_url(&request.model);
        let payload = MessageAdapter::to_gemini_payload(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            structured = request.response_schema.is_some(),
            "Sending request to Gemini"
        );

        let response: GeminiResponse = self.base.post_with_query_key(&url, &payload).await?;

        let candidates: Vec<String> = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|candidate| {
                let parts = candidate.content?.parts;
                let text: String = parts.into_iter().filter_map(|p| p.text).collect();
                Some(text)
            })
            .collect();
        debug!(
            candidates = candidates.len(),
            "Received response from Gemini"
        );

        Ok(GenerationResponse::new(candidates))
    }
}

#[async_trait]
impl DocumentStore for GeminiClient {
    async fn upload(&self, path: &Path) -> Result<DocumentHandle, ModelError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ModelError::Document {
                path: path.to_path_buf(),
                source,
            })?;
        let mime_type = mime_type_for(path);
        let url = self.base.build_url(&self.upload_path);

        info!(
            provider = self.base.id.as_str(),
            document = %path.display(),
            bytes = bytes.len(),
            "Uploading document to Gemini file store"
        );

        let response: UploadResponse = self
            .base
            .post_bytes_with_query_key(&url, mime_type, bytes)
            .await?;
        let file = response
            .file
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing file"))?;
        let uri = file
            .uri
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing file uri"))?;

        debug!(file = file.name.as_str(), "Document uploaded");
        Ok(DocumentHandle {
            name: file.name,
            uri,
            mime_type: file.mime_type.unwrap_or_else(|| mime_type.to_string()),
            source: path.to_path_buf(),
        })
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: Option<UploadedFile>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    name: String,
    uri: Option<String>,
    mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ProviderConfig {
        ProviderConfig {
            id: "gemini".into(),
            endpoint: "https://generativelanguage.googleapis.com/".into(),
            api_key: None,
            api_path: None,
            upload_path: None,
        }
    }

    #[test]
    fn model_url_uses_default_api_path() {
        let client = GeminiClient::from_config(&provider());
        assert_eq!(
            client.build_model_url("gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn mime_type_is_guessed_from_extension() {
        assert_eq!(mime_type_for(Path::new("a/paper.PDF")), "application/pdf");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_type_for(Path::new("blob")), "application/octet-stream");
    }

    #[tokio::test]
    async fn generate_without_api_key_fails_before_network() {
        let client = GeminiClient::from_config(&provider());
        let request = GenerationRequest::new("gemini-2.0-flash", Vec::new());
        let err = client.generate(request).await.expect_err("missing key");
        assert!(matches!(err, ModelError::MissingApiKey { .. }));
    }
}
