//! Error taxonomy for a single transformation attempt.

use thiserror::Error;

use crate::skill::ProficiencyLevel;

/// Model output held no parseable JSON object under any extraction strategy.
#[derive(Debug, Error)]
#[error("no parseable JSON object in model response ({text_len} bytes): {parse_error}")]
pub struct ExtractionError {
    /// Parse error of the whole trimmed response. Rendered in the message, not chained.
    pub parse_error: serde_json::Error,
    pub text_len: usize,
}

/// One level that came back with too few statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Level \"{level}\" must have at least {minimum} statements, but found {found}")]
pub struct LevelViolation {
    pub level: ProficiencyLevel,
    pub found: usize,
    pub minimum: usize,
}

/// Well-formed JSON that breaks the per-level minimum. Lists every offending level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid skill transformation: {}. Please regenerate with at least {} statements per level.",
    join_violations(.violations),
    crate::pipeline::validator::MIN_STATEMENTS_PER_LEVEL
)]
pub struct StructuralValidationError {
    pub violations: Vec<LevelViolation>,
}

impl StructuralValidationError {
    pub fn levels(&self) -> Vec<ProficiencyLevel> {
        self.violations.iter().map(|v| v.level).collect()
    }
}

fn join_violations(violations: &[LevelViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum TransformError {
    /// Reserved for template-variable constraints; prompt rendering is currently total.
    #[error("prompt build failed: {0}")]
    PromptBuild(String),

    #[error("model invocation failed: {0:#}")]
    Model(anyhow::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] StructuralValidationError),
}

/// A failed attempt, tagged with the skill it was for. `kind` is part of the message.
#[derive(Debug, Error)]
#[error("skill {skill_id} ({skill_name}): {kind}")]
pub struct TransformFailure {
    pub skill_id: String,
    pub skill_name: String,
    pub kind: TransformError,
}

impl TransformFailure {
    /// True when the model answered with valid JSON of the wrong shape, the case worth regenerating.
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, TransformError::Validation(_))
    }
}
