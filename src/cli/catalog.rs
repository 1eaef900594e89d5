use anyhow::Result;
use std::io::{self, Write};

use super::{ensure_credentials, load_config, open_catalog, GlobalOptions};
use crate::lightcast::{LightcastSkill, SkillQuery, SkillType};
use crate::util::truncate_display;

const RULE_WIDTH: usize = 60;

/// Numbered listing, one block per skill, descriptions cut to one line.
pub fn write_skill_listing<W: Write>(skills: &[LightcastSkill], out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    for (i, skill) in skills.iter().enumerate() {
        let description = skill.description.as_deref().unwrap_or("No description");
        writeln!(out, "{:3}. {}", i + 1, skill.name)?;
        writeln!(out, "     Type: {}", skill.type_name())?;
        writeln!(out, "     {}", truncate_display(description, RULE_WIDTH))?;
        writeln!(out)?;
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_type_listing<W: Write>(types: &[SkillType], out: &mut W) -> io::Result<()> {
    for (i, skill_type) in types.iter().enumerate() {
        writeln!(out, "  {}. {}: {}", i + 1, skill_type.id, skill_type.name)?;
    }
    Ok(())
}

/// `types` subcommand
pub async fn run_types(opts: &GlobalOptions) -> Result<()> {
    let config = load_config(opts)?;
    ensure_credentials(&config, true, opts.dry_run)?;
    let catalog = open_catalog(&config, opts.dry_run).await?;

    let types = catalog.skill_types().await?;
    let mut out = io::stdout().lock();
    writeln!(out, "Available skill types:")?;
    write_type_listing(&types, &mut out)?;
    Ok(())
}

/// `search` subcommand
pub async fn run_search(
    query: String,
    type_id: Option<String>,
    limit: Option<usize>,
    opts: &GlobalOptions,
) -> Result<()> {
    let config = load_config(opts)?;
    ensure_credentials(&config, true, opts.dry_run)?;
    let catalog = open_catalog(&config, opts.dry_run).await?;

    let query = SkillQuery {
        query: Some(query).filter(|q| !q.trim().is_empty()),
        type_id,
        limit: limit.unwrap_or(config.lightcast.search_limit),
    };
    let skills = catalog.search(&query).await?;

    let mut out = io::stdout().lock();
    if skills.is_empty() {
        writeln!(out, "No skills found")?;
    } else {
        write_skill_listing(&skills, &mut out)?;
    }
    Ok(())
}
