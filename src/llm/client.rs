use anyhow::Result;
use async_trait::async_trait;

/// The model capability: prompt text in, raw response text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Offline stand-in used by `--dry-run`. Answers every transformation prompt
/// with a fenced, well-formed skill built from the prompt's own fields.
pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_field<'a>(prompt: &'a str, label: &str) -> Option<&'a str> {
    prompt
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(label))
        .map(str::trim)
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let name = prompt_field(prompt, "Name:").unwrap_or("Unnamed Skill");
        let id = prompt_field(prompt, "Lightcast ID:").unwrap_or("");
        let description = prompt_field(prompt, "Description:").unwrap_or("");

        let skill = serde_json::json!({
            "name": name,
            "description": description,
            "lightcast_id": id,
            "levels": {
                "poor": [
                    format!("Applies {} without structure and fails to reach the expected outcome", name),
                    format!("Unable to explain basic {} decisions when asked", name),
                ],
                "basic": [
                    format!("Completes routine {} tasks based on provided instructions", name),
                    format!("Recognizes core {} concepts and applies them correctly", name),
                ],
                "intermediate": [
                    format!("Delivers complex {} work without supervision", name),
                    format!("Identifies subtle {} issues by applying a repeatable method", name),
                ],
                "advanced": [
                    format!("Mentors others in {} and reviews their work", name),
                    format!("Creates {} standards adopted by the team", name),
                    format!("Connects {} work to non-obvious business outcomes", name),
                ],
                "exceptional": [
                    format!("Recognized externally as an authority in {}", name),
                    format!("Solves unprecedented {} challenges using novel methods", name),
                ]
            }
        });

        Ok(format!(
            "Here is the transformed skill:\n\n```json\n{}\n```\n",
            serde_json::to_string_pretty(&skill)?
        ))
    }
}
