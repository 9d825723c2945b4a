//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Office lease vs. co-working cost calculator
#[derive(Parser, Debug)]
#[command(name = "spacecost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(
        short,
        long,
        global = true,
        env = "SPACECOST_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Display horizon in months (12, 36 or 60)
    #[arg(long, global = true)]
    pub horizon: Option<u32>,

    /// Currency code (symbol only, no conversion)
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Annual growth of monthly OpEx in percent
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub growth_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare totals at the horizon
    Summary {
        /// Scenario file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
    },

    /// Month-by-month cumulative totals
    Project {
        /// Scenario file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
    },

    /// Bar chart of cumulative totals
    Chart {
        /// Scenario file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
        /// Show every Nth month
        #[arg(short, long, default_value_t = 1)]
        step: usize,
    },

    /// Show both cost structures as trees
    Tree {
        /// Scenario file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
    },

    /// Interactive session on stdin
    Shell {
        /// Scenario to start from
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
