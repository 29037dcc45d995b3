//! Clap derive structures for the `aetherlink` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aetherlink -- see what is on your local network
#[derive(Debug, Parser)]
#[command(
    name = "aetherlink",
    version,
    about = "Discover and monitor devices on the local network",
    long_about = "Discover devices on the local network segment, classify them by\n\
        vendor and hostname, and track bandwidth and connection history.\n\n\
        Serves demo data unless --real (or use_real_data in the config) is set.",
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
    /// Probe this host instead of serving demo data
    #[arg(long, global = true)]
    pub real: bool,

    /// Local network prefix, e.g. 192.168.1 (overrides config)
    #[arg(long, value_name = "PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Collection timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH", env = "AETHERLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AETHERLINK_OUTPUT",
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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full dashboard snapshot: stats, devices, activity, traffic chart
    #[command(alias = "st")]
    Status,

    /// List devices or show one device
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Headline network numbers
    Stats,

    /// Recent device activity, newest first
    #[command(alias = "act")]
    Activities(ActivitiesArgs),

    /// Rebuild the snapshot on an interval
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-command arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: Option<DevicesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices on the segment
    #[command(alias = "ls")]
    List,

    /// Show one device
    Get {
        /// Device ID or MAC address
        device: String,
    },
}

#[derive(Debug, Args)]
pub struct ActivitiesArgs {
    /// Number of events to show
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between snapshots
    #[arg(long, short = 'i', default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Stop after this many snapshots
    #[arg(long, short = 'n')]
    pub count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
