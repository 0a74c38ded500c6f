//! Engine configuration.
//!
//! Controls where recipe and template data is read from and how recipes are
//! matched. Configuration can be loaded from and saved to a TOML file.

use ironforge_crafting::ShapelessStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "ironforge.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Data Locations ===
    /// Root directory for all data files
    pub data_dir: PathBuf,
    /// Recipe directory, relative to `data_dir` unless absolute
    pub recipe_dir: PathBuf,
    /// Item template file, relative to `data_dir` unless absolute
    pub templates_file: PathBuf,

    // === Matching ===
    /// Strategy forced on every shapeless recipe (None = per recipe)
    pub shapeless_strategy: Option<ShapelessStrategy>,

    // === Diagnostics ===
    /// Warn about recipes using tags the host does not know
    pub log_unresolved_tags: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            recipe_dir: PathBuf::from("recipes"),
            templates_file: PathBuf::from("templates.toml"),
            shapeless_strategy: None,
            log_unresolved_tags: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    ///
    /// Falls back to defaults when the file is missing or malformed.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory scanned for recipe files.
    #[must_use]
    pub fn recipe_path(&self) -> PathBuf {
        self.data_dir.join(&self.recipe_dir)
    }

    /// Location of the item template file.
    #[must_use]
    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join(&self.templates_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.recipe_path(), Path::new("data").join("recipes"));
        assert_eq!(config.templates_path(), Path::new("data").join("templates.toml"));
        assert!(config.shapeless_strategy.is_none());
        assert!(config.log_unresolved_tags);
    }

    #[test]
    fn test_absolute_paths_override_data_dir() {
        let config = EngineConfig {
            recipe_dir: PathBuf::from("/srv/recipes"),
            ..EngineConfig::default()
        };
        assert_eq!(config.recipe_path(), PathBuf::from("/srv/recipes"));
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("ironforge.toml");

        let config = EngineConfig {
            data_dir: PathBuf::from("/srv/ironforge"),
            shapeless_strategy: Some(ShapelessStrategy::Exhaustive),
            log_unresolved_tags: false,
            ..EngineConfig::default()
        };
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/ironforge.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "shapeless_strategy = \"random\"").expect("write");

        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }

    #[test]
    fn test_config_toml_keys() {
        let toml_str = toml::to_string_pretty(&EngineConfig::default()).expect("serialize");
        let table: toml::Table = toml::from_str(&toml_str).expect("parse");
        let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["data_dir", "log_unresolved_tags", "recipe_dir", "templates_file"]
        );
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "shapeless_strategy = \"exhaustive\"\n").expect("write");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config.shapeless_strategy, Some(ShapelessStrategy::Exhaustive));
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }
}
