use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{ensure_credentials, export_outcome, load_config, open_catalog, GlobalOptions};
use crate::lightcast::SkillQuery;
use crate::llm::factory::create_client;
use crate::pipeline::batch::run_batch;
use crate::pipeline::transformer::Transformer;
use crate::skill::SkillSource;

/// Arguments of the non-interactive `transform` subcommand.
#[derive(Debug, Clone, Default)]
pub struct TransformArgs {
    /// Lightcast skill ids to fetch and transform
    pub ids: Vec<String>,
    /// JSON file holding an array of skill records
    pub input: Option<PathBuf>,
    /// Keyword search whose results are all transformed
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub output: Option<PathBuf>,
    pub retry_invalid: bool,
}

impl TransformArgs {
    fn needs_catalog(&self) -> bool {
        !self.ids.is_empty() || self.query.is_some()
    }
}

/// Skill records from a JSON file: a bare array, or a `{"data": [...]}` catalog dump.
pub fn read_sources(path: &Path) -> Result<Vec<SkillSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read skills file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse skills file {}", path.display()))?;
    let records = match value {
        serde_json::Value::Object(mut map) => map
            .remove("data")
            .with_context(|| format!("{} has no \"data\" array", path.display()))?,
        other => other,
    };
    serde_json::from_value(records)
        .with_context(|| format!("{} does not hold a list of skills", path.display()))
}

pub async fn run(args: TransformArgs, opts: &GlobalOptions) -> Result<()> {
    if args.ids.is_empty() && args.input.is_none() && args.query.is_none() {
        bail!("Nothing to transform: pass --id, --input or --query");
    }

    let config = load_config(opts)?;
    ensure_credentials(&config, args.needs_catalog(), opts.dry_run)?;

    let mut sources = Vec::new();
    if let Some(ref input) = args.input {
        let from_file = read_sources(input)?;
        info!("Read {} skills from {}", from_file.len(), input.display());
        sources.extend(from_file);
    }

    if args.needs_catalog() {
        let catalog = open_catalog(&config, opts.dry_run).await?;
        for id in &args.ids {
            match catalog.get_skill(id).await? {
                Some(skill) => sources.push(skill.to_source()),
                None => warn!("Skill {} not found in catalog, skipping", id),
            }
        }
        if let Some(ref query) = args.query {
            let limit = args.limit.unwrap_or(config.lightcast.search_limit);
            let found = catalog.search(&SkillQuery::keyword(query, limit)).await?;
            info!("Search '{}' matched {} skills", query, found.len());
            sources.extend(found.iter().map(|s| s.to_source()));
        }
    }

    if sources.is_empty() {
        bail!("No skills to transform");
    }

    let client = create_client(&config, opts.dry_run)?;
    let transformer = Transformer::new(client.as_ref());
    let retry_invalid = args.retry_invalid || config.generation.retry_invalid;
    let output = args.output.unwrap_or(config.output.path);

    let mut out = io::stdout().lock();
    let outcome = run_batch(&transformer, &sources, retry_invalid, &mut out).await?;
    export_outcome(&outcome, &output, &mut out)?;

    if outcome.transformed.is_empty() {
        bail!("All {} skills failed to transform", outcome.attempted());
    }
    Ok(())
}
