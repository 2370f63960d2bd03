//! Configuration management for predictext
//!
//! This module handles loading, parsing, and managing configuration from
//! various sources:
//! - Configuration files (TOML format)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Grammar source configuration
    #[serde(default)]
    pub grammars: GrammarConfig,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format for suggestion lists (text, json, table)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show tooltip text next to each suggestion
    #[serde(default = "default_show_tooltips")]
    pub show_tooltips: bool,

    /// Maximum number of suggestions to display (0 = no limit)
    ///
    /// Applied only when rendering output. The engine itself always
    /// produces the full list.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One suggestion per line, optional tooltip after two spaces.
    ///
    /// Suitable for: shell completion bridges, piping to other tools
    Text,

    /// JSON array of `{text, tooltip}` objects.
    ///
    /// Suitable for: editor plugins, scripting
    Json,

    /// ASCII table with suggestion and tooltip columns.
    ///
    /// Suitable for: reading in a terminal
    Table,
}

/// Interactive shell history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Grammar source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Directory with user-provided grammar definition files
    ///
    /// Each file is named `<tool>.toml` and describes one tool's syntax.
    #[serde(default = "default_grammar_directory")]
    pub directory: PathBuf,

    /// Include the grammar definitions compiled into the binary
    #[serde(default = "default_builtin_grammars")]
    pub builtin: bool,
}

// Default value functions
fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_color_output() -> bool {
    true
}

fn default_show_tooltips() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    0
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".predictext_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

fn default_grammar_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".predictext")
        .join("grammars")
}

fn default_builtin_grammars() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            history: HistoryConfig::default(),
            logging: LoggingConfig::default(),
            grammars: GrammarConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
            show_tooltips: default_show_tooltips(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            directory: default_grammar_directory(),
            builtin: default_builtin_grammars(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// A missing file is not an error: defaults are returned so a fresh
    /// installation works without any setup.
    ///
    /// # Arguments
    /// * `path` - Explicit config path, or None for the default location
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Ok(config)
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".predictext")
            .join("config.toml")
    }

    /// Save configuration to a file
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            crate::utils::fs::ensure_dir_exists(parent)?;
        }
        std::fs::write(path.as_ref(), self.to_toml_with_comments()?)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Render the configuration as TOML with a comment above each section
    ///
    /// # Returns
    /// * `Result<String>` - Commented TOML document
    pub fn to_toml_with_comments(&self) -> Result<String> {
        let raw =
            toml::to_string(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let mut doc: toml_edit::DocumentMut = raw
            .parse()
            .map_err(|e: toml_edit::TomlError| ConfigError::InvalidFormat(e.to_string()))?;

        let section_comments = [
            ("display", "# How suggestion lists are presented.\n"),
            ("history", "# Interactive shell history.\n"),
            ("logging", "# Diagnostic logging.\n"),
            ("grammars", "# Where grammar definitions come from.\n"),
        ];
        for (key, comment) in section_comments {
            if let Some(table) = doc.get_mut(key).and_then(|item| item.as_table_mut()) {
                table.decor_mut().set_prefix(format!("\n{comment}"));
            }
        }

        Ok(doc.to_string())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.format, OutputFormat::Text);
        assert!(config.display.color_output);
        assert!(config.grammars.builtin);
        assert_eq!(config.display.max_suggestions, 0);
    }

    #[test]
    fn test_parse_partial_config() {
        let raw = r#"
            [display]
            format = "json"
            color_output = false
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(!config.display.color_output);
        // Untouched sections fall back to defaults
        assert_eq!(config.history.max_size, 1000);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let path = Path::new("/nonexistent/predictext/config.toml");
        let config = Config::load_from_file(Some(path)).unwrap();
        assert_eq!(config.display.format, OutputFormat::Text);
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let mut config = Config::default();
        config.history.max_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_with_comments_contains_sections() {
        let config = Config::default();
        let rendered = config.to_toml_with_comments().unwrap();
        assert!(rendered.contains("[display]"));
        assert!(rendered.contains("[grammars]"));
        assert!(rendered.contains("# Diagnostic logging."));
    }

    #[test]
    fn test_to_tracing_level() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.display.format = OutputFormat::Table;
        config.display.max_suggestions = 25;

        let raw = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.display.format, OutputFormat::Table);
        assert_eq!(parsed.display.max_suggestions, 25);
    }
}
