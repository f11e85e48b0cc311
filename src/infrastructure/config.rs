//! Workspace settings (.scada/config.toml)

use crate::error::{Result, ScadaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the workspace metadata directory
pub const WORKSPACE_DIR: &str = ".scada";

/// Key the configuration collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "scada-diagram-configs";

pub const DEFAULT_EXPORT_DIR: &str = ".";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8998/v1";

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_dir() -> String {
    DEFAULT_EXPORT_DIR.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Export directory, relative to the workspace root unless absolute
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    pub created: DateTime<Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            storage_key: default_storage_key(),
            export_dir: default_export_dir(),
            api_base_url: default_api_base_url(),
            created: Utc::now(),
        }
    }

    /// Load config from .scada/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(WORKSPACE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScadaError::NotWorkspace(path.to_path_buf())
            } else {
                ScadaError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| ScadaError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .scada/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let scada_dir = path.join(WORKSPACE_DIR);
        let config_path = scada_dir.join("config.toml");

        if !scada_dir.exists() {
            fs::create_dir(&scada_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ScadaError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// API base URL, with SCADA_API_BASE_URL taking precedence
    pub fn get_api_base_url(&self) -> String {
        std::env::var("SCADA_API_BASE_URL").unwrap_or_else(|_| self.api_base_url.clone())
    }

    /// Resolve the export directory against the workspace root
    pub fn export_path(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.export_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config_defaults() {
        let config = Config::new();
        assert_eq!(config.storage_key, "scada-diagram-configs");
        assert_eq!(config.export_dir, ".");
        assert_eq!(config.api_base_url, "http://localhost:8998/v1");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.export_dir = "exports".to_string();

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".scada").exists());
        assert!(temp.path().join(".scada/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.storage_key, config.storage_key);
        assert_eq!(loaded.export_dir, "exports");
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            ScadaError::NotWorkspace(_) => {}
            other => panic!("Expected NotWorkspace error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".scada")).unwrap();
        fs::write(
            temp.path().join(".scada/config.toml"),
            "created = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_export_path_relative_and_absolute() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();

        config.export_dir = "out".to_string();
        assert_eq!(config.export_path(temp.path()), temp.path().join("out"));

        let abs = temp.path().join("elsewhere");
        config.export_dir = abs.to_string_lossy().to_string();
        assert_eq!(config.export_path(Path::new("/ignored")), abs);
    }
}
