use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub output: OutputRules,
    pub find: FindRules,
    pub logging: LoggingRules,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRules {
    pub format: OutputStyle,
    /// Pretty-print JSON filters
    pub pretty: bool,
}

impl Default for OutputRules {
    fn default() -> Self {
        Self {
            format: OutputStyle::Text,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FindRules {
    /// Maximum number of series printed by find-series
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingRules {
    /// Default log filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingRules {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn parse_config(raw: &str) -> Result<FilterConfig, toml::de::Error> {
    toml::from_str::<FilterConfig>(raw)
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = default_config();
        assert_eq!(config.output.format, OutputStyle::Text);
        assert!(config.output.pretty);
        assert_eq!(config.find.limit, None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[find]\nlimit = 10\n").unwrap();
        assert_eq!(config.find.limit, Some(10));
        assert_eq!(config.output.format, OutputStyle::Text);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        assert!(parse_config("[output]\nformat = \"yaml\"\n").is_err());
    }
}
