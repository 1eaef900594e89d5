use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use people_protocol::cli::{self, transform::TransformArgs, GlobalOptions};

#[derive(Parser)]
#[command(name = "people-protocol", version)]
#[command(about = "Build People Protocol skill rubrics from the Lightcast catalog", long_about = None)]
struct Cli {
    /// Path to config file (defaults to ./people-protocol.toml or ~/.config/people-protocol/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override LLM model (e.g., "claude-sonnet-4-20250514", "gpt-4o")
    #[arg(long, global = true)]
    model: Option<String>,

    /// Override LLM provider (anthropic, openai, openai-compatible)
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Use the mock catalog and mock LLM client, no network access
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the skill types the catalog knows about
    Types,

    /// Search the catalog by keyword
    Search {
        query: String,

        /// Restrict results to one skill type id (e.g., "ST1")
        #[arg(long = "type")]
        type_id: Option<String>,

        /// Maximum number of results (default: from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Transform skills without prompting and export them
    Transform {
        /// Lightcast skill id to transform (repeatable)
        #[arg(long = "id")]
        ids: Vec<String>,

        /// JSON file with skill records to transform
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Transform every result of this keyword search
        #[arg(short = 'q', long)]
        query: Option<String>,

        /// Maximum number of search results to transform
        #[arg(long)]
        limit: Option<usize>,

        /// Output file path (default: from config)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Regenerate once when a response has too few statements per level
        #[arg(long)]
        retry_invalid: bool,
    },

    /// Browse, select, transform and export skills from a menu
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = GlobalOptions {
        config: cli.config,
        model: cli.model,
        provider: cli.provider,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Types => cli::catalog::run_types(&opts).await?,
        Commands::Search {
            query,
            type_id,
            limit,
        } => cli::catalog::run_search(query, type_id, limit, &opts).await?,
        Commands::Transform {
            ids,
            input,
            query,
            limit,
            output,
            retry_invalid,
        } => {
            let args = TransformArgs {
                ids,
                input,
                query,
                limit,
                output,
                retry_invalid,
            };
            cli::transform::run(args, &opts).await?
        }
        Commands::Interactive => cli::interactive::run(&opts).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_transform_defaults() {
        let cli = Cli::try_parse_from(["people-protocol", "transform"]).unwrap();
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Transform {
                ids,
                input,
                output,
                retry_invalid,
                ..
            } => {
                assert!(ids.is_empty());
                assert!(input.is_none());
                assert!(output.is_none());
                assert!(!retry_invalid);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn test_parse_transform_with_all_args() {
        let cli = Cli::try_parse_from([
            "people-protocol",
            "transform",
            "--id",
            "KS1",
            "--id",
            "KS2",
            "-i",
            "skills.json",
            "-q",
            "python",
            "--limit",
            "5",
            "-o",
            "out.json",
            "--retry-invalid",
            "--model",
            "gpt-4o",
            "--provider",
            "openai",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.provider.as_deref(), Some("openai"));
        assert!(cli.dry_run);
        match cli.command {
            Commands::Transform {
                ids,
                input,
                query,
                limit,
                output,
                retry_invalid,
            } => {
                assert_eq!(ids, vec!["KS1", "KS2"]);
                assert_eq!(input.unwrap(), PathBuf::from("skills.json"));
                assert_eq!(query.unwrap(), "python");
                assert_eq!(limit, Some(5));
                assert_eq!(output.unwrap(), PathBuf::from("out.json"));
                assert!(retry_invalid);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn test_parse_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "people-protocol",
            "--config",
            "custom.toml",
            "--dry-run",
            "interactive",
        ])
        .unwrap();
        assert_eq!(cli.config.unwrap(), PathBuf::from("custom.toml"));
        assert!(cli.dry_run);
        assert!(matches!(cli.command, Commands::Interactive));
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "people-protocol",
            "search",
            "data visualization",
            "--type",
            "ST1",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { query, type_id, limit } => {
                assert_eq!(query, "data visualization");
                assert_eq!(type_id.as_deref(), Some("ST1"));
                assert!(limit.is_none());
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_search_requires_query() {
        assert!(Cli::try_parse_from(["people-protocol", "search"]).is_err());
    }

    #[test]
    fn test_parse_missing_subcommand() {
        let result = Cli::try_parse_from(["people-protocol"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        let result = Cli::try_parse_from(["people-protocol", "generate"]);
        assert!(result.is_err());
    }
}
