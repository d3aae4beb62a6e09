//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mailgist - Summarize email archives into key points and documents.
#[derive(Debug, Parser)]
#[command(name = "mailgist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print debug-level diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize an archive and render PDFs, RTFs and the HTML digest
    Process(ProcessArgs),

    /// Publish summaries to Notion without rendering documents
    Export(ExportArgs),

    /// Create a Notion database with the expected schema
    SetupDb(SetupDbArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Directory containing .eml files (defaults to the current directory)
    pub input_dir: Option<PathBuf>,

    /// Directory generated documents are written into
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Key points to extract per message (minimum 1)
    #[arg(long)]
    pub sentences: Option<usize>,

    /// Directory processed .eml files are moved into
    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    /// Skip PDF generation
    #[arg(long)]
    pub skip_pdf: bool,

    /// Also publish summaries to Notion
    #[arg(long)]
    pub notion: bool,

    /// Leave source files in place instead of moving them
    #[arg(long)]
    pub keep: bool,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion database id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Directory containing .eml files (defaults to the current directory)
    pub input_dir: Option<PathBuf>,

    /// Key points to extract per message (minimum 1)
    #[arg(long)]
    pub sentences: Option<usize>,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion database id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,
}

/// Arguments for the setup-db command.
#[derive(Debug, Parser)]
pub struct SetupDbArgs {
    /// Id of the Notion page the database is created under
    #[arg(long)]
    pub parent_page: String,

    /// Title of the created database
    #[arg(long, default_value = "Email Summaries")]
    pub title: String,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,
}
