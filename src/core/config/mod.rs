//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitbridge has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITBRIDGE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitbridge/config.toml`
//! 3. `~/.gitbridge/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/gitbridge/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitbridge::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("Remote: {}", config.remote());
//! println!("Context lines: {}", config.compare_options().context_lines);
//! ```

pub mod schema;

pub use schema::{CompareSection, ConfigFile, FetchSection, PushSection};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::diff::CompareOptions;
use crate::network::{FetchOptions, PushOptions};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GITBRIDGE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo over global over
/// built-in defaults, field by field.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Repository configuration (if in a repo and the file exists)
    pub repo: Option<ConfigFile>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        let repo = git_dir.map(Self::repo_config_path);
        Self::load_files(global.as_deref(), repo.as_deref())
    }

    /// Load configuration from explicit file paths.
    ///
    /// Paths that do not exist are skipped.
    pub fn load_files(global: Option<&Path>, repo: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, global_path) = match global.filter(|p| p.exists()) {
            Some(path) => (Self::read_config(path)?, Some(path.to_path_buf())),
            None => (ConfigFile::default(), None),
        };
        let (repo, repo_path) = match repo.filter(|p| p.exists()) {
            Some(path) => (Some(Self::read_config(path)?), Some(path.to_path_buf())),
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        debug!(global = ?global_path, repo = ?repo_path, "loaded config");
        Ok(Config { global, repo })
    }

    /// Locate the global config file, if any exists.
    pub fn global_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitbridge/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitbridge/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the repo config file for a `.git` directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gitbridge/config.toml")
    }

    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Pick a value from repo, then global.
    fn pick<T>(&self, get: impl Fn(&ConfigFile) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .or(self.global.remote.as_deref())
            .unwrap_or("origin")
    }

    /// Fetch options with configured defaults applied.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            prune: self.pick(|c| c.fetch.as_ref().and_then(|f| f.prune)),
            tags: self
                .pick(|c| c.fetch.as_ref().and_then(FetchSection::tag_mode))
                .unwrap_or_default(),
        }
    }

    /// Push options with configured defaults applied.
    pub fn push_options(&self) -> PushOptions {
        let mut options = PushOptions::default();
        if let Some(n) = self.pick(|c| c.push.as_ref().and_then(|p| p.packbuilder_parallelism)) {
            options.packbuilder_parallelism = n;
        }
        options
    }

    /// Comparison options with configured defaults applied.
    pub fn compare_options(&self) -> CompareOptions {
        let mut options = CompareOptions::default();
        if let Some(n) = self.pick(|c| c.compare.as_ref().and_then(|s| s.context_lines)) {
            options.context_lines = n;
        }
        if let Some(n) = self.pick(|c| c.compare.as_ref().and_then(|s| s.interhunk_lines)) {
            options.interhunk_lines = n;
        }
        if let Some(b) = self.pick(|c| c.compare.as_ref().and_then(|s| s.detect_renames)) {
            options.detect_renames = b;
        }
        options
    }
}
