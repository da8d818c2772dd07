use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tripsort")]
#[command(about = "Rule-based categorization of travel booking records")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config directory holding tripsort.toml and the rule files (default: ~/.tripsort)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize a JSON array of booking records
    Classify {
        /// Input file with a JSON array of records
        input: PathBuf,

        /// Write annotated records here (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-category counts after the summary
        #[arg(long)]
        breakdown: bool,
    },

    /// Show how a single venue/destination pair is categorized
    Explain {
        /// Raw venue name
        #[arg(long, default_value = "")]
        venue: String,

        /// Raw destination name
        #[arg(long, default_value = "")]
        destination: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the rule files and print what was found
    Rules,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show config file path
    Path,
    /// Write a commented tripsort.toml if none exists
    Init,
}
