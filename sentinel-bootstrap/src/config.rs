// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Configuration
//!
//! The handful of settings the bootstrap layer itself needs before the
//! application layer takes over: where the rule/threshold configuration
//! file lives, where the dedup database lives, and the shutdown grace
//! period. Rule-file parsing (`max_file_size_bytes`, `match_rules`, ...)
//! is an application-layer concern; this module only resolves *paths*.

use std::path::PathBuf;
use std::time::Duration;

/// Default location for the rule configuration file, relative to the
/// current working directory, when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "sentinel.toml";

/// Default location for the dedup store's SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "sentinel.db";

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub config_path: PathBuf,
    pub database_path: PathBuf,
    pub shutdown_grace_period: Duration,
    pub verbose: bool,
}

impl BootstrapConfig {
    pub fn resolve(config_path: Option<PathBuf>, database_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            database_path: database_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            shutdown_grace_period: Duration::from_secs(30),
            verbose,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::resolve(None, None, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let config = BootstrapConfig::resolve(None, None, false);
        assert_eq!(config.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.shutdown_grace_period, Duration::from_secs(30));
    }

    #[test]
    fn explicit_paths_override_defaults() {
        let config = BootstrapConfig::resolve(Some(PathBuf::from("custom.toml")), Some(PathBuf::from("custom.db")), true);
        assert_eq!(config.config_path, PathBuf::from("custom.toml"));
        assert_eq!(config.database_path, PathBuf::from("custom.db"));
        assert!(config.verbose);
    }
}
