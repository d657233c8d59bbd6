/// Append-only conversation memory of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<String>,
}

pub const AI_RESPONSE: &str = "AI Response";
pub const TOOL_OUTPUT: &str = "Tool Output";
pub const AGENT_RESPONSE: &str = "Agent Response";
pub const PREVIOUS_AGENT_RESPONSE: &str = "Previous Agent Response";
pub const USER_MESSAGE: &str = "User Message";

const HEADER: &str = "Message History: ";

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str, text: impl AsRef<str>) {
        self.entries.push(format!("{label}: {}", text.as_ref()));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let mut rendered = String::from(HEADER);
        for entry in &self.entries {
            rendered.push('\n');
            rendered.push_str(entry);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_render_in_order_under_header() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.render(), "Message History: ");
        transcript.push(AI_RESPONSE, "{}");
        transcript.push(TOOL_OUTPUT, "42");
        assert_eq!(
            transcript.render(),
            "Message History: \nAI Response: {}\nTool Output: 42"
        );
        assert_eq!(transcript.len(), 2);
    }
}
