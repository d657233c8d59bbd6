use serde::{Deserialize, Serialize};

/// Built-in tool implementations a config entry can instantiate.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Fetches whatever `url` argument the model supplies.
    UrlFetch,
    /// Fetches one fixed URL and takes no arguments.
    PresetUrl,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: String,
    pub kind: ToolKind,
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTool {
    /// Shorthand: `tools = ["url_fetch"]`
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        kind: Option<ToolKind>,
        description: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<RawTool> for ToolConfig {
    fn from(value: RawTool) -> Self {
        match value {
            RawTool::Name(name) => Self {
                name,
                kind: ToolKind::UrlFetch,
                description: None,
                url: None,
            },
            RawTool::Detailed {
                name,
                kind,
                description,
                url,
            } => Self {
                kind: kind.unwrap_or(if url.is_some() {
                    ToolKind::PresetUrl
                } else {
                    ToolKind::UrlFetch
                }),
                name,
                description,
                url,
            },
        }
    }
}
