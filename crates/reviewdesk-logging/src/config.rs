// ABOUTME: Configuration structures and environment variable parsing for logging
// ABOUTME: Handles log levels, output targets, and file path configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;

/// Wrapper for tracing::Level that implements Serialize/Deserialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.as_str().to_lowercase())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_log_level(&s)
            .map(LogLevel)
            .map_err(serde::de::Error::custom)
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

/// Main configuration structure for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Per-module log level overrides
    pub module_levels: HashMap<String, LogLevel>,

    pub output: OutputConfig,

    pub file: FileConfig,
}

/// Configuration for different output targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub console: bool,
    pub file: bool,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

/// Configuration for file logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Path to log file (defaults to <data dir>/reviewdesk/logs/reviewdesk.log)
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: HashMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            json: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_log_file_path(),
        }
    }
}

impl LoggingConfig {
    /// Create a new configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `lookup`.
    ///
    /// REVIEWDESK_LOG wins over RUST_LOG; the remaining variables only need to be set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(directives) = lookup("REVIEWDESK_LOG") {
            self.parse_directives(&directives)
                .context("Invalid REVIEWDESK_LOG value")?;
        } else if let Some(directives) = lookup("RUST_LOG") {
            self.parse_directives(&directives)
                .context("Invalid RUST_LOG value")?;
        }

        if lookup("REVIEWDESK_LOG_JSON").is_some() {
            self.output.json = true;
        }
        if lookup("REVIEWDESK_LOG_NO_CONSOLE").is_some() {
            self.output.console = false;
        }
        if lookup("REVIEWDESK_LOG_FILE").is_some() {
            self.output.file = true;
        }
        if lookup("REVIEWDESK_LOG_NO_FILE").is_some() {
            self.output.file = false;
        }

        Ok(())
    }

    /// Parse `info,reviewdesk_workspace=debug` style directives.
    fn parse_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',').map(str::trim) {
            if directive.is_empty() {
                continue;
            }

            if let Some((module, level_str)) = directive.split_once('=') {
                let level = parse_log_level(level_str).with_context(|| {
                    format!("Invalid log level '{level_str}' for module '{module}'")
                })?;
                self.module_levels
                    .insert(module.to_string(), LogLevel(level));
            } else {
                self.level = LogLevel(
                    parse_log_level(directive)
                        .with_context(|| format!("Invalid global log level '{directive}'"))?,
                );
            }
        }
        Ok(())
    }

    /// Render the configuration as an EnvFilter directive string
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![self.level.0.as_str().to_lowercase()];
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort_by(|a, b| a.0.cmp(b.0));
        for (module, level) in modules {
            directives.push(format!("{module}={}", level.0.as_str().to_lowercase()));
        }
        directives.join(",")
    }
}

fn default_log_file_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir
            .join("reviewdesk")
            .join("logs")
            .join("reviewdesk.log"),
        None => PathBuf::from("reviewdesk.log"),
    }
}

/// Parse a log level string (case-insensitive).
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level.0, Level::INFO);
        assert!(config.output.console);
        assert!(!config.output.file);
        assert!(!config.output.json);
        assert!(config.file.path.to_string_lossy().contains("reviewdesk.log"));
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("Warning").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_reviewdesk_log_wins_over_rust_log() {
        let mut config = LoggingConfig::default();
        config
            .apply_env_overrides(env_of(&[
                ("REVIEWDESK_LOG", "debug,reviewdesk_workspace=trace"),
                ("RUST_LOG", "error"),
            ]))
            .unwrap();

        assert_eq!(config.level.0, Level::DEBUG);
        assert_eq!(
            config.module_levels.get("reviewdesk_workspace"),
            Some(&LogLevel(Level::TRACE))
        );
    }

    #[test]
    fn test_output_flags_from_env() {
        let mut config = LoggingConfig::default();
        config
            .apply_env_overrides(env_of(&[
                ("REVIEWDESK_LOG_JSON", "1"),
                ("REVIEWDESK_LOG_NO_CONSOLE", "1"),
                ("REVIEWDESK_LOG_FILE", "1"),
            ]))
            .unwrap();

        assert!(config.output.json);
        assert!(!config.output.console);
        assert!(config.output.file);
    }

    #[test]
    fn test_invalid_directive_is_rejected() {
        let mut config = LoggingConfig::default();
        let result = config.apply_env_overrides(env_of(&[("RUST_LOG", "reviewdesk=loud")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_directives() {
        let mut config = LoggingConfig::default();
        config
            .module_levels
            .insert("reviewdesk_workspace".into(), LogLevel(Level::DEBUG));
        assert_eq!(config.filter_directives(), "info,reviewdesk_workspace=debug");
    }
}
