//! `lsx` CLI - export Label Studio projects, tasks and flattened annotations

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lsx::config::Overrides;

#[derive(Parser)]
#[command(name = "lsx")]
#[command(about = "Extract and flatten Label Studio annotations")]
#[command(version)]
struct Cli {
    /// Label Studio base URL [env: LABEL_STUDIO_URL]
    #[arg(long, global = true)]
    url: Option<String>,

    /// Label Studio API key [env: LABEL_STUDIO_API_KEY]
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log requests and flattening details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects
    Projects {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Dump the raw tasks of a project as JSON
    Tasks {
        /// Project ID
        project_id: i64,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flatten the annotations of a project into rows
    Annotations {
        /// Project ID
        project_id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Table rendering for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown table
    Table,
    /// JSON array of objects
    Json,
    /// CSV with a header row
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let overrides = Overrides {
        url: cli.url,
        api_key: cli.api_key,
    };

    match cli.command {
        Commands::Projects { format } => {
            cmd::projects::cmd_projects(overrides, format).await?;
        }
        Commands::Tasks { project_id, output } => {
            cmd::tasks::cmd_tasks(overrides, project_id, output).await?;
        }
        Commands::Annotations {
            project_id,
            format,
            output,
        } => {
            cmd::annotations::cmd_annotations(overrides, project_id, format, output).await?;
        }
    }

    Ok(())
}
