use tracing::{debug, warn};

use super::error::{TransformError, TransformFailure};
use super::extractor::extract_candidate;
use super::validator::validate;
use crate::llm::client::LlmClient;
use crate::llm::prompts::build_transformation_prompt;
use crate::skill::{SkillSource, TransformedSkill};

/// Runs one prompt/response round trip per skill and returns an honest verdict on it.
///
/// Holds no state between calls; retrying is left to the caller.
pub struct Transformer<'a> {
    client: &'a dyn LlmClient,
}

impl<'a> Transformer<'a> {
    pub fn new(client: &'a dyn LlmClient) -> Self {
        Self { client }
    }

    pub async fn transform(
        &self,
        source: &SkillSource,
    ) -> Result<TransformedSkill, TransformFailure> {
        self.attempt(source)
            .await
            .map_err(|kind| TransformFailure {
                skill_id: source.identifier.clone(),
                skill_name: source.name.clone(),
                kind,
            })
    }

    async fn attempt(&self, source: &SkillSource) -> Result<TransformedSkill, TransformError> {
        let prompt = build_transformation_prompt(source);
        debug!(
            "transform {}: prompt {} bytes",
            source.identifier,
            prompt.len()
        );

        let raw = self
            .client
            .complete(&prompt)
            .await
            .map_err(TransformError::Model)?;
        debug!(
            "transform {}: response {} bytes",
            source.identifier,
            raw.len()
        );

        finish(source, &raw)
    }
}

/// Extract and validate a raw model response for `source`. No model call involved.
pub fn finish(source: &SkillSource, raw: &str) -> Result<TransformedSkill, TransformError> {
    let candidate = extract_candidate(raw)?;
    let skill = validate(candidate, source)?;
    for note in skill.advisories() {
        warn!("{} ({}): {}", skill.name, skill.source_identifier, note);
    }
    Ok(skill)
}
