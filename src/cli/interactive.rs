//! Menu-driven session: browse the catalog, collect a selection, transform and export it.

use anyhow::Result;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

use super::catalog::{write_skill_listing, write_type_listing};
use super::{ensure_credentials, export_outcome, load_config, open_catalog, GlobalOptions};
use crate::config::Config;
use crate::lightcast::{LightcastSkill, SkillCatalog, SkillQuery, SkillType};
use crate::llm::client::LlmClient;
use crate::llm::factory::create_client;
use crate::pipeline::batch::run_batch;
use crate::pipeline::transformer::Transformer;
use crate::selection::{parse_indices, Selection};
use crate::skill::SkillSource;

const BANNER_WIDTH: usize = 60;

/// Knobs the session takes from config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub search_limit: usize,
    pub browse_limit: usize,
    pub output_path: PathBuf,
    pub retry_invalid: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_limit: config.lightcast.search_limit,
            browse_limit: config.lightcast.browse_limit,
            output_path: config.output.path.clone(),
            retry_invalid: config.generation.retry_invalid,
        }
    }
}

pub struct InteractiveSession<'a, R, W> {
    catalog: &'a dyn SkillCatalog,
    transformer: Transformer<'a>,
    settings: SessionSettings,
    input: R,
    out: W,
    types: Vec<SkillType>,
    selection: Selection<LightcastSkill>,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(
        catalog: &'a dyn SkillCatalog,
        client: &'a dyn LlmClient,
        settings: SessionSettings,
        input: R,
        out: W,
    ) -> Self {
        Self {
            catalog,
            transformer: Transformer::new(client),
            settings,
            input,
            out,
            types: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub fn selection(&self) -> &Selection<LightcastSkill> {
        &self.selection
    }

    /// Run the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out, "People Protocol Skill Builder")?;
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;

        match self.catalog.skill_types().await {
            Ok(types) => self.types = types,
            Err(e) => warn!("Could not load skill types: {:#}", e),
        }

        loop {
            writeln!(self.out, "\nSelected skills: {}", self.selection.len())?;
            writeln!(self.out, "\nOptions:")?;
            writeln!(self.out, "  1. Search skills by keyword")?;
            writeln!(self.out, "  2. Browse skills by type")?;
            writeln!(self.out, "  3. View selected skills")?;
            writeln!(self.out, "  4. Transform and export selected skills")?;
            writeln!(self.out, "  5. Exit")?;

            let Some(choice) = self.prompt("\nChoice (1-5): ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.search_by_keyword().await?,
                "2" => self.browse_by_type().await?,
                "3" => self.review_selection()?,
                "4" => self.transform_and_export().await?,
                "5" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice")?,
            }
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_or_empty(&mut self, label: &str) -> Result<String> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }

    async fn search_by_keyword(&mut self) -> Result<()> {
        let keyword = self.prompt_or_empty("Enter search keyword: ")?;
        if keyword.is_empty() {
            return Ok(());
        }

        let query = SkillQuery::keyword(keyword, self.settings.search_limit);
        let found = match self.catalog.search(&query).await {
            Ok(found) => found,
            Err(e) => {
                writeln!(self.out, "Search failed: {:#}", e)?;
                return Ok(());
            }
        };
        self.offer(&found)
    }

    async fn browse_by_type(&mut self) -> Result<()> {
        if self.types.is_empty() {
            writeln!(self.out, "No skill types available")?;
            return Ok(());
        }
        writeln!(self.out, "\nSkill types:")?;
        write_type_listing(&self.types, &mut self.out)?;

        let answer = self.prompt_or_empty("Select type number: ")?;
        let Some(&index) = parse_indices(&answer, self.types.len()).first() else {
            writeln!(self.out, "Invalid selection")?;
            return Ok(());
        };

        let query = SkillQuery::of_type(self.types[index].id.clone(), self.settings.browse_limit);
        let found = match self.catalog.search(&query).await {
            Ok(found) => found,
            Err(e) => {
                writeln!(self.out, "Browse failed: {:#}", e)?;
                return Ok(());
            }
        };
        self.offer(&found)
    }

    /// Show a listing and let the user add some or all of it to the selection.
    fn offer(&mut self, found: &[LightcastSkill]) -> Result<()> {
        if found.is_empty() {
            writeln!(self.out, "No skills found")?;
            return Ok(());
        }
        write_skill_listing(found, &mut self.out)?;

        let answer = self.prompt_or_empty(
            "Enter skill numbers to add (comma-separated), 'all', or Enter to skip: ",
        )?;
        let added = if answer.eq_ignore_ascii_case("all") {
            self.selection.add_all(found)
        } else if answer.is_empty() {
            0
        } else {
            self.selection.add_picked(found, &answer)
        };
        if added > 0 {
            writeln!(self.out, "Added {} skills to selection", added)?;
        }
        Ok(())
    }

    fn review_selection(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            writeln!(self.out, "No skills selected")?;
            return Ok(());
        }
        writeln!(self.out, "\nSelected skills ({}):", self.selection.len())?;
        for (i, skill) in self.selection.iter().enumerate() {
            writeln!(self.out, "  {}. {} ({})", i + 1, skill.name, skill.id)?;
        }

        let answer = self.prompt_or_empty(
            "Enter numbers to remove (comma-separated), 'clear' to remove all, or Enter to keep: ",
        )?;
        if answer.eq_ignore_ascii_case("clear") {
            self.selection.clear();
            writeln!(self.out, "Selection cleared")?;
        } else if !answer.is_empty() {
            for removed in self.selection.remove_picked(&answer) {
                writeln!(self.out, "Removed {}", removed.name)?;
            }
        }
        Ok(())
    }

    async fn transform_and_export(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            writeln!(self.out, "No skills selected")?;
            return Ok(());
        }
        let sources: Vec<SkillSource> = self.selection.iter().map(|s| s.to_source()).collect();
        writeln!(self.out, "\nTransforming {} skills...", sources.len())?;

        let outcome = run_batch(
            &self.transformer,
            &sources,
            self.settings.retry_invalid,
            &mut self.out,
        )
        .await?;
        export_outcome(&outcome, &self.settings.output_path, &mut self.out)?;

        // Exported skills leave the selection; failed ones stay for another attempt.
        let done: HashSet<&str> = outcome
            .transformed
            .iter()
            .map(|s| s.source_identifier.as_str())
            .collect();
        self.selection.retain(|s| !done.contains(s.id.as_str()));
        if !self.selection.is_empty() {
            writeln!(
                self.out,
                "{} skills remain selected for another attempt",
                self.selection.len()
            )?;
        }
        Ok(())
    }
}

/// `interactive` subcommand, bound to stdin and stdout.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let config = load_config(opts)?;
    ensure_credentials(&config, true, opts.dry_run)?;
    let catalog = open_catalog(&config, opts.dry_run).await?;
    let client = create_client(&config, opts.dry_run)?;

    let stdin = std::io::stdin();
    let mut session = InteractiveSession::new(
        catalog.as_ref(),
        client.as_ref(),
        SessionSettings::from_config(&config),
        stdin.lock(),
        std::io::stdout(),
    );
    session.run().await
}
