//! Configuration file support for the kitchen tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/kitchen/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Command output configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Column names used when annotating inventory exports
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_id_column")]
    pub id_column: String,

    #[serde(default = "default_item_code_column")]
    pub item_code_column: String,

    #[serde(default = "default_source_recipe_column")]
    pub source_recipe_column: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            item_code_column: default_item_code_column(),
            source_recipe_column: default_source_recipe_column(),
        }
    }
}

// Default value functions
fn default_pretty() -> bool {
    true
}

fn default_id_column() -> String {
    "id".into()
}

fn default_item_code_column() -> String {
    "item_code".into()
}

fn default_source_recipe_column() -> String {
    "source_recipe_id".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from(".config"))
        });
        base.join("kitchen").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject column names that could never match a CSV header
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("inventory.id_column", &self.inventory.id_column),
            ("inventory.item_code_column", &self.inventory.item_code_column),
            (
                "inventory.source_recipe_column",
                &self.inventory.source_recipe_column,
            ),
        ];

        for (name, value) in columns {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}
