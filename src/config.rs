//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/wishlist/wishlist.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `WISHLIST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{DEFAULT_EXPORT_FILE, DEFAULT_PHASES_KEY, DEFAULT_THEME_KEY};
use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub phases_key: Option<String>,
    pub theme_key: Option<String>,
    pub export_file: Option<PathBuf>,
}

/// Unified configuration for wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory of the file-backed key-value store
    pub data_dir: PathBuf,
    /// Storage key of the phases document
    pub phases_key: String,
    /// Storage key of the theme literal
    pub theme_key: String,
    /// Default target of `wishlist export`
    pub export_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            phases_key: DEFAULT_PHASES_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

/// Default data directory (`$XDG_DATA_HOME/wishlist`, or `~/.wishlist`).
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "wishlist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.wishlist"))
}

/// Get the XDG config directory for wishlist.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wishlist").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("wishlist.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);

        let expanded = expand_env_vars(self.export_file.to_string_lossy().as_ref());
        self.export_file = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            phases_key: overlay
                .phases_key
                .clone()
                .unwrap_or_else(|| self.phases_key.clone()),
            theme_key: overlay
                .theme_key
                .clone()
                .unwrap_or_else(|| self.theme_key.clone()),
            export_file: overlay
                .export_file
                .clone()
                .unwrap_or_else(|| self.export_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, applied over the global one.
    ///   It must exist when given.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Settings::load`], reading `WISHLIST_*` overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply WISHLIST_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("WISHLIST")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("phases_key") {
            settings.phases_key = val;
        }
        if let Ok(val) = config.get_string("theme_key") {
            settings.theme_key = val;
        }
        if let Ok(val) = config.get_string("export_file") {
            settings.export_file = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Storage keys must be distinct, non-empty plain file names inside `data_dir`.
    fn validate(&self) -> Result<(), ApplicationError> {
        for (name, key) in [("phases_key", &self.phases_key), ("theme_key", &self.theme_key)] {
            if key.trim().is_empty() {
                return Err(ApplicationError::Config {
                    message: format!("{name} must not be empty"),
                });
            }
            if key.contains(['/', '\\']) || key == "." || key == ".." {
                return Err(ApplicationError::Config {
                    message: format!("{name} '{key}' must be a plain file name"),
                });
            }
        }
        if self.phases_key == self.theme_key {
            return Err(ApplicationError::Config {
                message: format!(
                    "phases_key and theme_key must differ (both '{}')",
                    self.phases_key
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# wishlist configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/wishlist/wishlist.toml
#   File:   wishlist --config <path>
#   Env:    WISHLIST_* environment variables (e.g. WISHLIST_DATA_DIR)

# Directory holding the stored wishlist
# data_dir = "~/.local/share/wishlist"

# Storage keys (one file per key inside data_dir)
# phases_key = "wishlist"
# theme_key = "wishlist_theme"

# Default target of `wishlist export`
# export_file = "wishlist.json"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_uses_standard_keys() {
        let settings = Settings::default();
        assert_eq!(settings.phases_key, "wishlist");
        assert_eq!(settings.theme_key, "wishlist_theme");
        assert_eq!(settings.export_file, PathBuf::from("wishlist.json"));
        assert!(settings.data_dir.to_string_lossy().contains("wishlist"));
    }

    #[test]
    fn given_tilde_in_data_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_dir: PathBuf::from("~/.wishlist"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let dir = settings.data_dir.to_string_lossy();
        assert!(dir.starts_with(&home), "data_dir should start with home: {dir}");
        assert!(!dir.contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            theme_key: Some("theme".to_string()),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.theme_key, "theme");
        assert_eq!(merged.phases_key, base.phases_key);
        assert_eq!(merged.data_dir, base.data_dir);
    }

    #[test]
    fn given_default_settings_when_validating_then_ok() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn given_parent_dir_key_when_validating_then_rejected() {
        let settings = Settings {
            theme_key: "..".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_settings_when_serialized_then_template_keys_match() {
        let toml = Settings::default().to_toml().unwrap();
        for key in ["data_dir", "phases_key", "theme_key", "export_file"] {
            assert!(toml.contains(key), "missing {key}");
            assert!(Settings::template().contains(key));
        }
    }
}
