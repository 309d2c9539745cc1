//! Configuration System
//!
//! Layered configuration for the `fstree` tool, lowest precedence first:
//! built-in defaults, the user config file
//! (`<config dir>/fstree/config.toml`), the snapshot root's `.fstree.toml`,
//! then `FSTREE_*` environment variables (`FSTREE_WALKER__MAX_DEPTH=3`).

use crate::error::ApiError;
use crate::ignore::PatternFilter;
use crate::logging::LoggingConfig;
use crate::tree::walker::{FingerprintMode, WalkerConfig};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-root configuration file
pub const ROOT_CONFIG_FILE: &str = ".fstree.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FstreeConfig {
    /// Walk and filter settings
    #[serde(default)]
    pub walker: WalkerSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Walk and filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerSettings {
    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum depth below the root (unset = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// File fingerprint mode: metadata or content
    #[serde(default)]
    pub fingerprint: FingerprintMode,

    /// Extra ignore patterns on top of the built-in defaults
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Also apply the root's .gitignore
    #[serde(default = "default_true")]
    pub use_gitignore: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            fingerprint: FingerprintMode::default(),
            ignore: Vec::new(),
            use_gitignore: default_true(),
        }
    }
}

impl WalkerSettings {
    /// Validate walker settings
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be at least 1".to_string());
        }
        if self.ignore.iter().any(|p| p.trim().is_empty()) {
            return Err("ignore patterns cannot be empty".to_string());
        }
        PatternFilter::new(&self.ignore).map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            fingerprint: self.fingerprint,
        }
    }

    /// Ignore filter for a snapshot root
    pub fn filter(&self, root: &Path) -> Result<PatternFilter, ApiError> {
        PatternFilter::for_root(root, &self.ignore, self.use_gitignore)
    }
}

impl FstreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        self.walker
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("walker: {}", e)))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::OutputError(e.to_string()))
    }
}

/// Loads [`FstreeConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a snapshot root
    pub fn load(root: &Path) -> Result<FstreeConfig, ApiError> {
        let mut builder = builder_with_defaults()?;

        if let Some(global) = global_config_path() {
            if global.is_file() {
                debug!(path = %global.display(), "Loading user configuration");
                builder = builder.add_source(File::from(global).required(false));
            }
        }

        let root_file = root.join(ROOT_CONFIG_FILE);
        if root_file.is_file() {
            debug!(path = %root_file.display(), "Loading root configuration");
            builder = builder.add_source(File::from(root_file).required(false));
        }

        Self::finish(builder.add_source(environment()))
    }

    /// Load configuration from a single file over the defaults
    pub fn load_from_file(path: &Path) -> Result<FstreeConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path.to_path_buf()));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<FstreeConfig, ApiError> {
        let config: FstreeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Path to the user configuration file, when a home directory is known
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fstree").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Create a Config builder with the default values applied
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("walker.follow_symlinks", false)?
        .set_default("walker.fingerprint", "metadata")?
        .set_default("walker.use_gitignore", true)?
        .set_default("logging.level", "warn")
}

fn environment() -> Environment {
    Environment::with_prefix("FSTREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
