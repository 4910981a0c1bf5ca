// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Loads the rule/threshold configuration file into the domain's
//! [`RuleDescriptor`]/[`AnalyzerConfig`] shapes, via the `config` crate
//! so environment variables prefixed `SENTINEL_` can override individual
//! fields without editing the file.

use sentinel_domain::entities::RuleDescriptor;
use sentinel_domain::services::AnalyzerConfig;
use serde::Deserialize;
use std::path::Path;

fn default_max_file_size_bytes() -> u64 {
    AnalyzerConfig::default().max_file_size_bytes
}

fn default_max_archive_size_bytes() -> u64 {
    AnalyzerConfig::default().max_archive_size_bytes
}

fn default_supported_archives() -> Vec<String> {
    AnalyzerConfig::default().supported_archives
}

fn default_max_archive_depth() -> u32 {
    AnalyzerConfig::default().max_archive_depth
}

/// On-disk shape of `sentinel.toml`. Deserialized once at start-up, then
/// split into the domain's [`AnalyzerConfig`] and a compiled
/// [`sentinel_domain::aggregates::RuleSet`].
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfigFile {
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_max_archive_size_bytes")]
    pub max_archive_size_bytes: u64,
    #[serde(default = "default_supported_archives")]
    pub supported_archives: Vec<String>,
    #[serde(default = "default_max_archive_depth")]
    pub max_archive_depth: u32,
    #[serde(rename = "rule", default)]
    pub rules: Vec<RuleDescriptor>,
}

impl RuleConfigFile {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            max_file_size_bytes: self.max_file_size_bytes,
            max_archive_size_bytes: self.max_archive_size_bytes,
            supported_archives: self.supported_archives.clone(),
            max_archive_depth: self.max_archive_depth,
        }
    }
}

/// Loads and parses the rule file at `path`. `SENTINEL_MAX_FILE_SIZE_BYTES`
/// and friends override individual scalar fields, matching the
/// environment-override convention the bootstrap layer already uses for
/// `--config`/`--database`.
pub fn load(path: &Path) -> Result<RuleConfigFile, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("SENTINEL").separator("__"))
        .build()?;
    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_fields_fall_back_to_analyzer_defaults() {
        let file = write_toml(
            r#"
            [[rule]]
            search_location = "file_name"
            search_pattern = "id_rsa"
            category = "credentials"
            relevance = "high"
            accuracy = "high"
            "#,
        );
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded.max_file_size_bytes, AnalyzerConfig::default().max_file_size_bytes);
        assert_eq!(loaded.rules.len(), 1);
    }

    #[test]
    fn explicit_thresholds_override_defaults() {
        let file = write_toml(
            r#"
            max_file_size_bytes = 1024
            max_archive_depth = 2
            "#,
        );
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded.max_file_size_bytes, 1024);
        assert_eq!(loaded.max_archive_depth, 2);
        assert!(loaded.rules.is_empty());
    }

    #[test]
    fn analyzer_config_carries_parsed_thresholds_through() {
        let file = write_toml("max_archive_size_bytes = 2048");
        let loaded = load(file.path()).unwrap();
        let analyzer_config = loaded.analyzer_config();
        assert_eq!(analyzer_config.max_archive_size_bytes, 2048);
    }
}
