//! CLI route: run context and command dispatch.

use crate::cli::output;
use crate::cli::parse::{Commands, OutputFormat};
use crate::config::{ConfigLoader, FstreeConfig};
use crate::error::ApiError;
use crate::ignore::PatternFilter;
use crate::tree::{DiskWalker, FsTree};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Runtime context for CLI execution: root, loaded configuration and
/// output format.
pub struct RunContext {
    root: PathBuf,
    config: FstreeConfig,
    format: OutputFormat,
}

impl RunContext {
    /// Create run context from the root and optional config path.
    pub fn new(
        root: PathBuf,
        config_path: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        Ok(Self::with_config(root, config, format))
    }

    pub fn with_config(root: PathBuf, config: FstreeConfig, format: OutputFormat) -> Self {
        Self {
            root,
            config,
            format,
        }
    }

    pub fn config(&self) -> &FstreeConfig {
        &self.config
    }

    fn filter(&self) -> Result<PatternFilter, ApiError> {
        self.config.walker.filter(&self.root)
    }

    /// Build a snapshot of the root with the configured walker and filter
    pub fn snapshot(&self) -> Result<FsTree, ApiError> {
        let walker = DiskWalker::with_config(self.config.walker.walker_config());
        Ok(FsTree::build_with(&self.root, &self.filter()?, &walker)?)
    }

    /// Execute a command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Scan { list } => {
                let tree = self.snapshot()?;
                match self.format {
                    OutputFormat::Text => Ok(output::format_scan_text(&tree, *list)),
                    OutputFormat::Json => output::format_scan_json(&tree, *list),
                }
            }
            Commands::Diff { interval_ms } => {
                let previous = self.snapshot()?;
                wait_for_change(*interval_ms)?;
                let current = self.snapshot()?;
                let diff = current.changes_from(&previous);
                info!(changed = diff.len(), "Diff completed");
                match self.format {
                    OutputFormat::Text => Ok(output::format_diff_text(&diff)),
                    OutputFormat::Json => output::format_diff_json(&diff),
                }
            }
            Commands::Find { name } => {
                let tree = self.snapshot()?;
                let paths = tree.paths_of_files_named(name);
                self.render_paths(&paths)
            }
            Commands::Suffix { suffix, prefer } => {
                let tree = self.snapshot()?;
                let paths: Vec<&Path> = tree
                    .path_of_best_file_matching_path_suffix(
                        suffix,
                        prefer.as_deref().unwrap_or_else(|| Path::new("")),
                    )
                    .into_iter()
                    .collect();
                self.render_paths(&paths)
            }
            Commands::Config => self.config.to_toml_string(),
        }
    }

    fn render_paths(&self, paths: &[&Path]) -> Result<String, ApiError> {
        match self.format {
            OutputFormat::Text => Ok(output::format_paths_text(paths)),
            OutputFormat::Json => output::format_paths_json(paths),
        }
    }
}

/// Block until the caller signals that the tree may have changed.
fn wait_for_change(interval_ms: Option<u64>) -> Result<(), ApiError> {
    match interval_ms {
        Some(ms) => {
            debug!(interval_ms = ms, "Waiting before second snapshot");
            std::thread::sleep(Duration::from_millis(ms));
        }
        None => {
            eprintln!("Snapshot taken. Press Enter to take the second snapshot...");
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
        }
    }
    Ok(())
}
