//! Pet configuration
//!
//! Loaded from `config.toml` (or `.json`) in the platform config directory.
//! A missing file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{PetError, Result};
use crate::pet::DecayPolicy;

/// Name used when nobody tells the pet who its owner is.
pub const DEFAULT_OWNER: &str = "Friend";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    /// Owner name; prompted for at start when unset
    pub owner_name: Option<String>,

    /// The pet's own name
    pub pet_name: String,

    /// How long messages stay on screen, in milliseconds
    pub message_pause_ms: u64,

    /// Hours fast-forwarded by the `decay` command
    pub simulate_hours: f64,

    /// Folder of `<expression>.txt` sprite files
    pub sprite_dir: Option<PathBuf>,

    /// Colored output
    pub color: bool,

    /// Decay rates
    pub decay: DecayPolicy,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            owner_name: None,
            pet_name: "Buddy".to_string(),
            message_pause_ms: 1500,
            simulate_hours: 10.0,
            sprite_dir: None,
            color: true,
            decay: DecayPolicy::default(),
        }
    }
}

impl PetConfig {
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "memory-pet", "memory-pet")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn message_pause(&self) -> Duration {
        Duration::from_millis(self.message_pause_ms)
    }

    /// Owner name, trimmed, falling back to [`DEFAULT_OWNER`].
    pub fn owner_or_default(&self) -> String {
        resolve_owner(self.owner_name.as_deref())
    }
}

/// Blank or missing names become [`DEFAULT_OWNER`].
pub fn resolve_owner(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_OWNER.to_string(),
    }
}

/// Load from the default location.
pub fn load_config() -> Result<PetConfig> {
    match PetConfig::config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::warn!("Could not determine config path, using defaults");
            Ok(PetConfig::default())
        }
    }
}

/// Load from `path`. TOML or JSON by extension.
pub fn load_config_from(path: &Path) -> Result<PetConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PetConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| PetError::config(format!("Failed to read config: {e}")))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)
            .map_err(|e| PetError::config(format!("Invalid TOML config: {e}"))),
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| PetError::config(format!("Invalid JSON config: {e}"))),
        _ => Err(PetError::UnsupportedConfigFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Save to `path`, creating parent directories.
pub fn save_config_to(config: &PetConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| PetError::config(format!("Failed to create config dir: {e}")))?;
    }

    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| PetError::config(format!("Failed to serialize config: {e}")))?,
        Some("json") => serde_json::to_string_pretty(config)
            .map_err(|e| PetError::config(format!("Failed to serialize config: {e}")))?,
        _ => {
            return Err(PetError::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            })
        }
    };

    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PetConfig::default();
        assert_eq!(config.pet_name, "Buddy");
        assert_eq!(config.message_pause(), Duration::from_millis(1500));
        assert_eq!(config.owner_or_default(), "Friend");
        assert_eq!(config.decay, DecayPolicy::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PetConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "owner_name = \"Ada\"\nmessage_pause_ms = 0\n\n[decay]\nclarity_per_hour = 1.0\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.owner_or_default(), "Ada");
        assert_eq!(config.message_pause_ms, 0);
        assert_eq!(config.pet_name, "Buddy");
        assert_eq!(config.decay.clarity_per_hour, 1.0);
        assert_eq!(config.decay.bond_per_hour, 3.0);
    }

    #[test]
    fn test_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"pet_name": "Pixel", "color": false}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.pet_name, "Pixel");
        assert!(!config.color);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pet_name = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid TOML config"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "pet_name: x").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(PetError::UnsupportedConfigFormat { .. })
        ));
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = PetConfig {
            owner_name: Some("Lin".to_string()),
            simulate_hours: 2.5,
            ..Default::default()
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_owner() {
        assert_eq!(resolve_owner(Some("  Kim ")), "Kim");
        assert_eq!(resolve_owner(Some("   ")), "Friend");
        assert_eq!(resolve_owner(None), "Friend");
    }
}
