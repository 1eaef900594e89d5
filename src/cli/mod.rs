//! Command implementations behind `main.rs`.

pub mod catalog;
pub mod interactive;
pub mod transform;

use anyhow::{bail, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::export::FrameworkDocument;
use crate::lightcast::{LightcastClient, MockCatalog, SkillCatalog};
use crate::pipeline::batch::BatchOutcome;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub model: Option<String>,
    pub provider: Option<String>,
    pub dry_run: bool,
}

/// Load config and apply CLI overrides
pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_with_path(opts.config.as_deref())?;

    if let Some(ref provider) = opts.provider {
        info!("CLI override: provider = {}", provider);
        config.llm.set_provider(provider);
    }
    if let Some(ref model) = opts.model {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }
    Ok(config)
}

/// Fail with every missing credential variable listed, before any network call.
pub fn ensure_credentials(config: &Config, needs_catalog: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    let missing = config.missing_credentials(needs_catalog);
    if missing.is_empty() {
        return Ok(());
    }
    let lines: Vec<String> = missing.iter().map(|var| format!("  - {}", var)).collect();
    bail!(
        "Missing environment variables:\n{}\nSet them with e.g. export {}=\"...\"",
        lines.join("\n"),
        missing[0]
    )
}

pub async fn open_catalog(config: &Config, dry_run: bool) -> Result<Box<dyn SkillCatalog>> {
    if dry_run {
        info!("Using mock skills catalog");
        return Ok(Box::new(MockCatalog::new()));
    }
    info!("Connecting to Lightcast...");
    Ok(Box::new(LightcastClient::connect(&config.lightcast).await?))
}

/// Export whatever succeeded and tell the user where it went.
pub fn export_outcome<W: Write>(outcome: &BatchOutcome, path: &Path, out: &mut W) -> Result<()> {
    if outcome.transformed.is_empty() {
        writeln!(out, "\nNo skills were successfully transformed")?;
        return Ok(());
    }

    let document = FrameworkDocument::new(outcome.transformed.clone());
    document.write_to(path)?;
    writeln!(
        out,
        "\n✓ Exported {} skills to {}",
        document.skills.len(),
        path.display()
    )?;
    if !outcome.failures.is_empty() {
        writeln!(out, "✗ {} skills failed:", outcome.failures.len())?;
        for failure in &outcome.failures {
            writeln!(out, "  - {}", failure)?;
        }
    }
    Ok(())
}
