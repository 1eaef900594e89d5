//! Recover one JSON object from free-form model output.
//!
//! Models answer either with bare JSON or with JSON inside a markdown fence,
//! tagged or not. Each [`ExtractionStrategy`] locates a candidate substring on
//! its own; [`extract_candidate`] tries them in [`ExtractionStrategy::ORDER`]
//! and keeps the first one that parses into an object.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::ExtractionError;

/// Untyped JSON object as the model produced it. Nothing about its shape is trusted yet.
pub type Candidate = Map<String, Value>;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The whole trimmed response.
    Bare,
    /// Body of the first ```json fence, up to the next closing fence.
    FencedTagged,
    /// Body between the first two ``` delimiters.
    FencedUntagged,
}

impl ExtractionStrategy {
    pub const ORDER: [ExtractionStrategy; 3] = [
        ExtractionStrategy::Bare,
        ExtractionStrategy::FencedTagged,
        ExtractionStrategy::FencedUntagged,
    ];

    /// Substring this strategy would parse, or `None` if it does not apply to `text`.
    pub fn locate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let trimmed = text.trim();
        match self {
            ExtractionStrategy::Bare => Some(trimmed),
            ExtractionStrategy::FencedTagged => {
                let start = trimmed.find(JSON_FENCE)? + JSON_FENCE.len();
                Some(fenced_body(&trimmed[start..]))
            }
            ExtractionStrategy::FencedUntagged => {
                let start = trimmed.find(FENCE)? + FENCE.len();
                Some(fenced_body(&trimmed[start..]))
            }
        }
    }
}

// An unterminated fence runs to the end of the text.
fn fenced_body(after_open: &str) -> &str {
    match after_open.find(FENCE) {
        Some(end) => after_open[..end].trim(),
        None => after_open.trim(),
    }
}

/// Parse the first candidate object out of `text`.
///
/// When every strategy fails, the error carries the parse failure of the bare
/// text, which is the diagnostic a caller can act on.
pub fn extract_candidate(text: &str) -> Result<Candidate, ExtractionError> {
    // Bare always applies; its error is the one reported.
    let original = match serde_json::from_str::<Candidate>(text.trim()) {
        Ok(candidate) => return Ok(candidate),
        Err(e) => e,
    };
    debug!("{:?} extraction failed: {}", ExtractionStrategy::Bare, original);

    let fenced = ExtractionStrategy::ORDER
        .into_iter()
        .filter(|s| *s != ExtractionStrategy::Bare);
    for strategy in fenced {
        let Some(slice) = strategy.locate(text) else {
            continue;
        };
        match serde_json::from_str::<Candidate>(slice) {
            Ok(candidate) => {
                debug!(
                    "extracted JSON object via {:?} ({} of {} bytes)",
                    strategy,
                    slice.len(),
                    text.len()
                );
                return Ok(candidate);
            }
            Err(e) => debug!("{:?} extraction failed: {}", strategy, e),
        }
    }

    Err(ExtractionError {
        parse_error: original,
        text_len: text.len(),
    })
}
