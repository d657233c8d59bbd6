use super::errors::AgentError;
use crate::config::PromptEntry;

/// Render prompt entries into preamble lines (`Key: text`), in order.
///
/// Keys are title-cased word by word, so `output_format` becomes
/// `Output_Format`.
pub fn render_prompt(entries: &[PromptEntry]) -> Result<Vec<String>, AgentError> {
    if entries.is_empty() {
        return Err(AgentError::validation("prompt cannot be empty"));
    }
    Ok(entries
        .iter()
        .map(|entry| format!("{}: {}", title_case(&entry.key), entry.text))
        .collect())
}

fn title_case(key: &str) -> String {
    let mut previous_alphabetic = false;
    key.chars()
        .map(|c| {
            let mapped = if previous_alphabetic {
                c.to_lowercase().collect::<String>()
            } else {
                c.to_uppercase().collect::<String>()
            };
            previous_alphabetic = c.is_alphabetic();
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_title_cased_and_order_is_kept() {
        let lines = render_prompt(&[
            PromptEntry::new("role", "You research papers."),
            PromptEntry::new("output_format", "JSON only"),
            PromptEntry::new("GOAL", "Answer"),
        ])
        .expect("prompt");
        assert_eq!(
            lines,
            [
                "Role: You research papers.",
                "Output_Format: JSON only",
                "Goal: Answer"
            ]
        );
    }

    #[test]
    fn empty_prompt_is_a_validation_error() {
        assert!(matches!(render_prompt(&[]), Err(AgentError::Validation(_))));
    }
}
