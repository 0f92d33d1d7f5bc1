//! Engine configuration.
//!
//! Provides where recipes are loaded from, how lookups are cached and what
//! gets logged. Configuration can be loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use foundry_recipes::CacheConfig;

use crate::recipe_loader::DEFAULT_RECIPE_PATH;

/// Configuration file name.
pub const CONFIG_FILE: &str = "foundry.toml";

/// Log directive used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "foundry=info";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Recipes ===
    /// Directory scanned for recipe JSON files
    pub recipe_path: PathBuf,
    /// Register the built-in recipes before the directory's
    pub load_builtin_recipes: bool,

    // === Diagnostics ===
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,

    // === Lookup cache ===
    /// Recipe input cache tuning
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recipe_path: PathBuf::from(DEFAULT_RECIPE_PATH),
            load_builtin_recipes: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads the config at `path`.
    ///
    /// Any problem (missing file, unreadable file, bad TOML) is logged and
    /// yields the defaults; a usable config is always returned.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No engine config, using defaults");
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| toml::from_str::<Self>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                config.validate();
                info!(path = %path.display(), "Engine config loaded");
                config
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring engine config");
                Self::default()
            },
        }
    }

    /// Writes the config to `path` as TOML, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, text)?;

        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Replaces unusable values with defaults.
    pub fn validate(&mut self) {
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        if self.recipe_path.as_os_str().is_empty() {
            self.recipe_path = PathBuf::from(DEFAULT_RECIPE_PATH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.load_builtin_recipes);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = EngineConfig::default();
        config.recipe_path = PathBuf::from("packs/recipes");
        config.load_builtin_recipes = false;
        config.cache.max_entries = 16;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/foundry.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "log_filter = \"\"\n[cache]\nenabled = false\n")
            .expect("write");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded.log_filter, DEFAULT_LOG_FILTER);
        assert!(!loaded.cache.enabled);
        assert_eq!(loaded.cache.max_entries, CacheConfig::default().max_entries);
        assert!(loaded.load_builtin_recipes);
    }

    #[test]
    fn test_config_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "recipe_path = [").expect("write");

        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }

    #[test]
    fn test_config_toml_serialization() {
        let toml_str = toml::to_string_pretty(&EngineConfig::default()).expect("Failed to serialize");
        assert!(toml_str.contains("recipe_path"));
        assert!(toml_str.contains("[cache]"));
    }
}
