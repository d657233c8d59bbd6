//! Built-in HTTP fetch tools.

use super::error::ToolError;
use super::parameter::ToolParameter;
use super::tool::{Tool, ToolSpec};
use crate::config::{ToolConfig, ToolKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

const URL_FETCH_DESCRIPTION: &str = "Fetch data from a provided URL";

/// Fetches the URL passed as the `url` argument and returns the body text.
pub struct UrlFetchTool {
    spec: ToolSpec,
    http: Client,
}

impl UrlFetchTool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, http: Client) -> Self {
        Self {
            spec: ToolSpec::new(name, description).with_parameter(ToolParameter::new(
                "url",
                "The URL to fetch data from",
                "string",
            )),
            http,
        }
    }
}

async fn fetch(http: &Client, tool: &str, url: &str) -> Result<String, ToolError> {
    debug!(tool, url, "Fetching URL");
    let http_error = |source| ToolError::Http {
        tool: tool.to_string(),
        source,
    };
    http.get(url)
        .send()
        .await
        .map_err(http_error)?
        .error_for_status()
        .map_err(http_error)?
        .text()
        .await
        .map_err(http_error)
}

#[async_trait]
impl Tool for UrlFetchTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
        let url = args
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::MissingArgument {
                tool: self.spec.name.clone(),
                argument: "url".into(),
            })?;
        fetch(&self.http, &self.spec.name, url).await
    }
}

/// Fetches one fixed URL; takes no arguments.
pub struct PresetUrlTool {
    spec: ToolSpec,
    url: String,
    http: Client,
}

impl PresetUrlTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            spec: ToolSpec::new(name, description),
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl Tool for PresetUrlTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, _args: &Map<String, Value>) -> Result<String, ToolError> {
        fetch(&self.http, &self.spec.name, &self.url).await
    }
}

/// Instantiate the tools declared in config, sharing one HTTP client.
pub fn build_tools(configs: &[ToolConfig]) -> Vec<Arc<dyn Tool>> {
    let http = Client::new();
    configs
        .iter()
        .map(|config| -> Arc<dyn Tool> {
            match config.kind {
                ToolKind::UrlFetch => Arc::new(UrlFetchTool::new(
                    config.name.clone(),
                    config
                        .description
                        .clone()
                        .unwrap_or_else(|| URL_FETCH_DESCRIPTION.to_string()),
                    http.clone(),
                )),
                ToolKind::PresetUrl => Arc::new(PresetUrlTool::new(
                    config.name.clone(),
                    config
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Fetch {}", config.url.as_deref().unwrap_or_default())),
                    config.url.clone().unwrap_or_default(),
                    http.clone(),
                )),
            }
        })
        .collect()
}
