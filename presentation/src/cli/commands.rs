//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for meal reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored step-by-step report
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for tablevote_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => tablevote_domain::OutputFormat::Text,
            OutputFormat::Json => tablevote_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for tablevote
#[derive(Parser, Debug)]
#[command(name = "tablevote")]
#[command(author, version, about = "Group consensus engine for choosing where to eat")]
#[command(long_about = r#"
tablevote lets a group agree on a restaurant by unanimous approval.

Each member filters the candidate restaurants by their own preferences and
votes approve or disapprove on what remains. A restaurant is chosen as soon
as every active member approves it. When everyone has voted without
agreement a new round opens; when no restaurant can reach agreement any
more the meal ends without a choice.

Configuration files are loaded from (in priority order):
1. TABLEVOTE_* environment variables
2. --config <path>     Explicit config file
3. ./tablevote.toml    Project-level config
4. ~/.config/tablevote/config.toml   Global config

Example:
  tablevote run demos/friday-dinner.json
  tablevote run demos/friday-dinner.json --output json
  tablevote show-config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a meal scenario file through the consensus engine
    Run {
        /// Scenario JSON file (members, preferences, catalog, steps)
        scenario: PathBuf,

        /// Output format (overrides [output] format)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Candidate catalog file (overrides the scenario's own catalog)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,

        /// Append meal events to this JSONL file
        #[arg(long, value_name = "PATH")]
        event_log: Option<PathBuf>,
    },

    /// Show configuration sources and the effective configuration
    ShowConfig,
}
