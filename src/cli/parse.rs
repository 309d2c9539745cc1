//! CLI parse: clap types for fstree. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fstree CLI - snapshot a directory and report what changed
#[derive(Parser, Debug)]
#[command(name = "fstree")]
#[command(about = "Snapshot a directory tree, look files up and diff snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Snapshot the root and print a summary
    Scan {
        /// Also list every item
        #[arg(long)]
        list: bool,
    },
    /// Snapshot, wait, snapshot again and print the difference
    Diff {
        /// Wait this long between snapshots instead of waiting for Enter
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// List every file with the given basename
    Find {
        /// Basename to look up
        name: String,
    },
    /// Resolve the best file ending with a path suffix
    Suffix {
        /// Path suffix, matched on component boundaries
        suffix: PathBuf,
        /// Prefer matches under this subtree
        #[arg(long)]
        prefer: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}
