//! Configuration module
//!
//! Defaults for the `add` command can be kept in a TOML file and passed with
//! `--config`. Flags given on the command line always win.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Values written into new tiddlers
    #[serde(default)]
    pub tiddler: TiddlerConfig,

    /// Editing behavior
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Defaults for new tiddler fields
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TiddlerConfig {
    /// Author written as the tiddler modifier
    pub author: String,

    /// Space-delimited tags
    pub tags: String,

    /// Hours added to the local clock for timestamps
    pub utc_offset_hours: i64,
}

impl Default for TiddlerConfig {
    fn default() -> Self {
        Self {
            author: addtiddler_core::template::DEFAULT_AUTHOR.to_string(),
            tags: String::new(),
            utc_offset_hours: 0,
        }
    }
}

/// Editing behavior defaults
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Replace existing tiddlers with the same title without asking
    pub replace: bool,

    /// Embed thumbnails instead of the original images
    pub resize: bool,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|e| CliError::ConfigError(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_optional(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.tiddler.author, "author");
        assert_eq!(config.tiddler.tags, "");
        assert_eq!(config.tiddler.utc_offset_hours, 0);
        assert!(!config.behavior.replace);
        assert!(!config.behavior.resize);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = CliConfig::from_toml("[tiddler]\nauthor = \"NatsuMizu\"\n").unwrap();
        assert_eq!(config.tiddler.author, "NatsuMizu");
        assert_eq!(config.tiddler.tags, "");
        assert!(!config.behavior.replace);
    }

    #[test]
    fn test_full_config() {
        let text = r#"
[tiddler]
author = "Ryan"
tags = "images timeseries"
utc_offset_hours = -5

[behavior]
replace = true
resize = true
"#;
        let config = CliConfig::from_toml(text).unwrap();
        assert_eq!(config.tiddler.utc_offset_hours, -5);
        assert_eq!(config.tiddler.tags, "images timeseries");
        assert!(config.behavior.replace);
        assert!(config.behavior.resize);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CliConfig::from_toml("[tiddler]\nauther = \"typo\"\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigError(_)));
        assert!(err.to_string().contains("auther"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[behavior]\nreplace = true").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert!(config.behavior.replace);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/addtiddler.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/addtiddler.toml"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }
}
