//! Configuration for vocab trainer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vocab_core::SelectionWeights;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where decks and the module list live.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Selection weight per status.
    #[serde(default)]
    pub selection: SelectionWeights,
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from default path.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save configuration to default path.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "vocab-trainer")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Directory holding the module list and deck files.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| directories::ProjectDirs::from("", "", "vocab-trainer").map(|d| d.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Module registry file.
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.registry_file)
    }

    /// Log file.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(&self.logging.file)
    }

    /// Maximum log level, `info` if unparsable.
    pub fn log_level(&self) -> tracing::Level {
        self.logging.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
}

fn default_registry_file() -> String { "modules.json".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            registry_file: default_registry_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_translation_secondary: bool,
    #[serde(default = "default_true")]
    pub show_plural: bool,
}

fn default_true() -> bool { true }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_translation_secondary: true,
            show_plural: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_file() -> String { "vocab-trainer.log".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            data_dir = "/srv/vocab"

            [selection]
            red = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(config.registry_path(), PathBuf::from("/srv/vocab/modules.json"));
        assert_eq!(config.selection.red, 25.0);
        assert_eq!(config.selection.green, 0.2);
        assert!(config.display.show_plural);
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_parse() {
        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
        config.logging.level = "loud".to_string();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_round_trip_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.storage.registry_file, "modules.json");
        assert_eq!(parsed.selection, config.selection);
    }
}
