use std::io::Write;
use tracing::{info, warn};

use super::error::TransformFailure;
use super::transformer::Transformer;
use crate::skill::{SkillSource, TransformedSkill};

/// What a batch run produced. Failures do not stop the batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub transformed: Vec<TransformedSkill>,
    pub failures: Vec<TransformFailure>,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.transformed.len() + self.failures.len()
    }
}

/// Transform `sources` one after another, printing a progress line per skill to `out`.
///
/// With `retry_invalid`, a skill whose response had the wrong shape gets one
/// more round trip. Extraction and model failures are reported as they are.
pub async fn run_batch<W: Write>(
    transformer: &Transformer<'_>,
    sources: &[SkillSource],
    retry_invalid: bool,
    out: &mut W,
) -> std::io::Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    let total = sources.len();

    for (i, source) in sources.iter().enumerate() {
        write!(out, "[{}/{}] {}... ", i + 1, total, source.name)?;
        out.flush()?;

        let mut result = transformer.transform(source).await;
        if retry_invalid {
            if let Err(ref failure) = result {
                if failure.is_structural() {
                    warn!("{}; regenerating once", failure);
                    result = transformer.transform(source).await;
                }
            }
        }

        match result {
            Ok(skill) => {
                writeln!(out, "✓")?;
                outcome.transformed.push(skill);
            }
            Err(failure) => {
                writeln!(out, "✗ ({})", failure.kind)?;
                warn!("{}", failure);
                outcome.failures.push(failure);
            }
        }
    }

    info!(
        "Batch finished: {} transformed, {} failed",
        outcome.transformed.len(),
        outcome.failures.len()
    );
    Ok(outcome)
}
