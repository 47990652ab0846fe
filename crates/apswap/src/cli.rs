//! Clap derive structures for the `apswap` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// apswap -- match replacement APs to old AP locations
#[derive(Debug, Parser)]
#[command(
    name = "apswap",
    version,
    about = "Match replacement access points to old AP locations via CDP neighbor data",
    long_about = "Reads `show ap cdp neighbors` and `show ap meraki monitoring summary`\n\
        output captured from a wireless controller, pairs each new AP with the\n\
        switch port it is cabled to, and fills MAC, serial and Meraki serial into\n\
        the tracking spreadsheet row recorded for that port.",
    after_help = "Examples:\n  \
        apswap run -c shows.txt -i tracking.csv -o output.csv\n  \
        apswap run -i tracking.csv --cdp show_ap_cdp_neighbors.txt \\\n      \
        --meraki show_ap_meraki_monitoring_summary.txt\n  \
        apswap run -c data/shows.txt -i data/tracking.csv --log-dir logs/",
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
    /// Output format (defaults to the configured format, then table)
    #[arg(long, env = "APSWAP_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Match APs by switch port and write the updated tracking CSV
    #[command(alias = "match")]
    Run(RunArgs),

    /// Show parsed CDP records, identity records and the port lookup
    #[command(alias = "dump")]
    Inspect(InspectArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Capture Arguments ─────────────────────────────────────────

/// Where the controller captures come from: one combined transcript, or
/// one file per show command.
#[derive(Debug, Args)]
#[group(id = "captures", required = true, multiple = true)]
pub struct CaptureArgs {
    /// Combined capture holding all show commands
    #[arg(long, short = 'c', value_name = "FILE", conflicts_with_all = ["cdp", "meraki"])]
    pub combined: Option<PathBuf>,

    /// Separate file: `show ap cdp neighbors` output
    #[arg(long, value_name = "FILE")]
    pub cdp: Option<PathBuf>,

    /// Separate file: `show ap meraki monitoring summary` output
    #[arg(long, value_name = "FILE")]
    pub meraki: Option<PathBuf>,
}

// ── Run ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub captures: CaptureArgs,

    /// Input CSV tracking spreadsheet
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_csv: PathBuf,

    /// Output CSV file (default: <input>_updated.csv)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output_csv: Option<PathBuf>,

    /// Directory for logs and debug files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Leading lines to drop from each separate capture file
    #[arg(long, value_name = "N")]
    pub skip_lines: Option<usize>,

    /// Data rows scanned for the matched-AP preview
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

// ── Inspect ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub captures: CaptureArgs,

    /// What to show
    #[arg(long, short = 's', default_value = "all")]
    pub section: InspectSection,

    /// Leading lines to drop from each separate capture file
    #[arg(long, value_name = "N")]
    pub skip_lines: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectSection {
    /// AP name -> neighbor and port
    Cdp,
    /// AP name -> MAC, serial and Meraki serial
    Identity,
    /// Switch port -> identity
    Lookup,
    /// Everything above
    All,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
