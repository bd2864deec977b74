//! Clap derive structures for the `sitepulse` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sitepulse_core::Strategy;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitepulse -- site status checks from the command line
#[derive(Debug, Parser)]
#[command(
    name = "sitepulse",
    version,
    about = "Check which sites are online, protected, or offline",
    long_about = "Polls the site registry, asks the backend whether each public domain\n\
        responds, and probes each backend origin directly (HEAD, then GET).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, short = 'b', env = "SITEPULSE_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Config file path
    #[arg(long, env = "SITEPULSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITEPULSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SITEPULSE_INSECURE", global = true)]
    pub insecure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one record per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// One site at a time, in registry order
    Sequential,
    /// All sites concurrently
    FanOut,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::FanOut => Strategy::FanOut,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe sites and report client and server status
    #[command(alias = "c")]
    Check(CheckArgs),

    /// List the site registry without probing
    #[command(alias = "ls")]
    Sites(SitesArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared filter arguments ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Location tag to select, or ALL
    #[arg(long, short = 'l', default_value = "ALL")]
    pub location: String,

    /// Case-insensitive search over name, domain, and location
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ── check ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Probe scheduling (overrides config)
    #[arg(long)]
    pub strategy: Option<StrategyArg>,

    /// Fan-out concurrency cap, 0 = unbounded (overrides config)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Show only this page (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page (overrides config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Exit with code 9 when any shown site's client status is offline
    #[arg(long)]
    pub fail_on_offline: bool,
}

// ── sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Fetch the registry page by page until exhausted
    #[arg(long, short = 'a')]
    pub all_pages: bool,
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file (prompts for the backend URL if not given)
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
