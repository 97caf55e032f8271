//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "flk",
    version,
    about = "Link free-text names to the best matching file in a catalog",
    long_about = None,
)]
pub struct Cli {
    /// Configuration file (default: ~/.filelinker/config.toml)
    #[arg(long, global = true, env = "FLK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog root directory
    #[arg(long, global = true, env = "FLK_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Name,
}

#[derive(Subcommand)]
pub enum Command {
    // === Matching ===
    /// Find the indexed file that best matches a name
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    // === Index ===
    /// Rescan the catalog and replace the index
    Rebuild,

    /// Discard the persisted index
    Invalidate,

    /// Show index status
    Status,

    /// List indexed entries
    #[command(alias = "ls")]
    List,

    // === Diagnostics ===
    /// Show the canonical key for names
    Normalize(NormalizeArgs),

    /// Score two names against each other
    Score(ScoreArgs),

    // === Completions ===
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Clone)]
pub struct ResolveArgs {
    /// Name to look up
    pub query: String,

    /// Minimum similarity score (0-100)
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,

    /// Match the first entry whose key contains the query instead of scoring
    #[arg(long, conflicts_with = "threshold")]
    pub contains: bool,

    /// Rebuild the index before matching
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args, Clone)]
pub struct NormalizeArgs {
    /// Names to normalize
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args, Clone)]
pub struct ScoreArgs {
    /// First name
    pub a: String,

    /// Second name
    pub b: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
