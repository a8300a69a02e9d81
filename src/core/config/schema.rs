//! core::config::schema
//!
//! Configuration file schema.
//!
//! The global and repository files share one schema. Every field is
//! optional so that a repository file can override single values of the
//! global one.
//!
//! # Validation
//!
//! Values are validated after parsing (e.g. `fetch.tags` must name a known
//! tag mode, `remote` must not be empty).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::network::TagFetchMode;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// remote = "origin"
///
/// [fetch]
/// prune = true
/// tags = "all"
///
/// [push]
/// packbuilder_parallelism = 4
///
/// [compare]
/// context_lines = 5
/// detect_renames = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Remote used when none is given (default: "origin")
    pub remote: Option<String>,

    /// Fetch defaults
    pub fetch: Option<FetchSection>,

    /// Push defaults
    pub push: Option<PushSection>,

    /// Comparison defaults
    pub compare: Option<CompareSection>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
            if remote.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "remote '{}' cannot contain whitespace",
                    remote
                )));
            }
        }

        if let Some(fetch) = &self.fetch {
            fetch.validate()?;
        }

        Ok(())
    }
}

/// `[fetch]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSection {
    /// Prune remote-tracking refs
    pub prune: Option<bool>,

    /// Tag mode: "auto", "all" or "none"
    pub tags: Option<String>,
}

impl FetchSection {
    /// Parsed tag mode, if set.
    pub fn tag_mode(&self) -> Option<TagFetchMode> {
        self.tags.as_deref().and_then(TagFetchMode::parse)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tags) = &self.tags {
            if TagFetchMode::parse(tags).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid fetch.tags '{}', must be one of: {}",
                    tags,
                    TagFetchMode::NAMES.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// `[push]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PushSection {
    /// Pack builder threads (0 = let the transport decide)
    pub packbuilder_parallelism: Option<u32>,
}

/// `[compare]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompareSection {
    /// Context lines around each hunk
    pub context_lines: Option<u32>,

    /// Unchanged lines that still merge two hunks
    pub interhunk_lines: Option<u32>,

    /// Run rename detection
    pub detect_renames: Option<bool>,
}
