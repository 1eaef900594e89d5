//! Framework document written at the end of a run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::skill::TransformedSkill;

pub const FRAMEWORK_NAME: &str = "People Protocol";
pub const FRAMEWORK_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkDocument {
    pub framework: String,
    pub version: String,
    pub skills: Vec<TransformedSkill>,
}

impl FrameworkDocument {
    pub fn new(skills: Vec<TransformedSkill>) -> Self {
        Self {
            framework: FRAMEWORK_NAME.to_string(),
            version: FRAMEWORK_VERSION.to_string(),
            skills,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize framework document")
    }

    /// Write as pretty JSON. The file is replaced in one step, never left half-written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} skills to {}", self.skills.len(), path.display());
        Ok(())
    }
}
