// verify-certs-config/src/config.rs
// ============================================================================
// Module: Verify Certs Configuration
// Description: Configuration loading and validation for Verify Certs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: verify-certs-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a strict size limit and
//! unknown-key rejection. Parse and validation failures fail closed; absent
//! values are not errors and resolve to the documented defaults at read
//! time. Handler sections are keyed by shortname so third-party handlers
//! reuse the same surface without code changes here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use verify_certs_core::ConfigReader;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;
/// Maximum length of a handler shortname key.
pub(crate) const MAX_SHORTNAME_LENGTH: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path the read was attempted from.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file exceeds the size limit.
    #[error("config file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// Path of the oversized file.
        path: String,
        /// Observed file size in bytes.
        size: u64,
        /// Maximum permitted size in bytes.
        limit: u64,
    },
    /// The configuration file failed to parse.
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// The configuration parsed but failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Verify Certs configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyCertsConfig {
    /// Registry-level configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Per-handler configuration, keyed by handler shortname.
    #[serde(default)]
    pub handlers: BTreeMap<String, HandlerConfig>,
}

/// Registry-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Global archive-checking flag; not consulted by the dispatch loop.
    #[serde(default)]
    pub checkarchive: bool,
}

/// Configuration values for a single handler.
///
/// Every field is optional; an absent value resolves to the handler's
/// documented default at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    /// Whether the handler participates in verification.
    pub enabled: Option<bool>,
    /// Whether non-owner viewers see identifying detail.
    pub displayinfo: Option<bool>,
    /// Whether a live miss falls through to the archive.
    pub checkarchive: Option<bool>,
    /// Whether the displayed date follows the print-date setting.
    pub matchprintdate: Option<bool>,
    /// Whether the verify-any template restriction is bypassed.
    pub bypassverifyany: Option<bool>,
}

impl VerifyCertsConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the
    /// size limit, fails to parse, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: MAX_CONFIG_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates handler section keys.
    ///
    /// Shortnames must be non-empty, ASCII lowercase alphanumeric, and
    /// bounded in length. Underscores are rejected because they would break
    /// the flat `{shortname}_{setting}` key mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a handler key is malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for shortname in self.handlers.keys() {
            if shortname.is_empty() {
                return Err(ConfigError::Invalid("handler shortname must not be empty".to_string()));
            }
            if shortname.len() > MAX_SHORTNAME_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "handler shortname {shortname} exceeds {MAX_SHORTNAME_LENGTH} characters"
                )));
            }
            if !shortname.bytes().all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit()) {
                return Err(ConfigError::Invalid(format!(
                    "handler shortname {shortname} must be ASCII lowercase alphanumeric"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Flat Flag Surface
// ============================================================================

impl ConfigReader for VerifyCertsConfig {
    fn flag(&self, key: &str) -> Option<bool> {
        if key == "checkarchive" {
            return Some(self.registry.checkarchive);
        }

        let (shortname, setting) = key.rsplit_once('_')?;
        let handler = self.handlers.get(shortname)?;
        match setting {
            "enabled" => handler.enabled,
            "displayinfo" => handler.displayinfo,
            "checkarchive" => handler.checkarchive,
            "matchprintdate" => handler.matchprintdate,
            "bypassverifyany" => handler.bypassverifyany,
            _ => None,
        }
    }
}
