// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Session configuration.
//!
//! Resolved in priority order:
//!   1. Code: `Config::default().with_output_mode(..)`
//!   2. File: `Config::load(path)` (YAML)
//!   3. Env:  `FLATBRIDGE_OUTPUT_MODE`, `FLATBRIDGE_LOG`
//!
//! # Example YAML
//!
//! ```yaml
//! # flatbridge.yaml
//! output_mode: borrowed
//! log_filter: "flatbridge=debug,info"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable selecting the [`OutputMode`].
pub const ENV_OUTPUT_MODE: &str = "FLATBRIDGE_OUTPUT_MODE";

/// Environment variable holding an `env_logger` filter string.
pub const ENV_LOG: &str = "FLATBRIDGE_LOG";

/// Who owns the buffers handed across the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Every output is a fresh allocation released by the caller.
    #[default]
    Owned,
    /// Outputs point into storage retained by the session. They stay valid
    /// until the next call on the same handle or until it is destroyed.
    Borrowed,
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owned" | "copy" => Ok(Self::Owned),
            "borrowed" | "retained" => Ok(Self::Borrowed),
            other => Err(Error::Config(format!("unknown output mode '{}'", other))),
        }
    }
}

/// Per-session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ownership of boundary outputs.
    pub output_mode: OutputMode,
    /// `env_logger` filter applied when the boundary initialises logging.
    pub log_filter: Option<String>,
}

impl Config {
    /// Build from `FLATBRIDGE_*` environment variables; unset or invalid
    /// values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_OUTPUT_MODE) {
            match raw.parse() {
                Ok(mode) => config.output_mode = mode,
                Err(e) => log::warn!("[config] ignoring {}: {}", ENV_OUTPUT_MODE, e),
            }
        }

        config.log_filter = lookup(ENV_LOG).filter(|filter| !filter.trim().is_empty());
        config
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    /// `Error::Config` on malformed YAML or unknown keys.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a YAML file.
    ///
    /// # Errors
    /// `Error::ConfigFileNotFound` if `path` does not exist, `Error::Config`
    /// if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigFileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}
