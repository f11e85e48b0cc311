//! Config management use case

use crate::error::{Result, ScadaError};
use crate::infrastructure::{
    validate_storage_key, Config, FileSystemRepository, WorkspaceRepository,
};

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "storage_key" => Ok(config.storage_key),
            "export_dir" => Ok(config.export_dir),
            "api_base_url" => Ok(config.api_base_url),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(ScadaError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: storage_key, export_dir, api_base_url, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "storage_key" => {
                validate_storage_key(value).map_err(ScadaError::Config)?;
                config.storage_key = value.to_string();
            }
            "export_dir" => {
                config.export_dir = value.to_string();
            }
            "api_base_url" => {
                config.api_base_url = value.to_string();
            }
            "created" => {
                return Err(ScadaError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(ScadaError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: storage_key, export_dir, api_base_url",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();
        ConfigService::new(repo)
    }

    #[test]
    fn test_get_and_set() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert_eq!(service.get("export_dir").unwrap(), ".");
        service.set("export_dir", "exports").unwrap();
        assert_eq!(service.get("export_dir").unwrap(), "exports");
    }

    #[test]
    fn test_created_is_read_only() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.get("created").is_ok());
        let err = service.set("created", "2020-01-01T00:00:00Z").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let err = service.get("mode").unwrap_err();
        assert!(err.to_string().contains("Unknown config key: 'mode'"));
        assert!(service.set("mode", "daily").is_err());
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert!(service.set("storage_key", "  ").is_err());
        assert_eq!(service.get("storage_key").unwrap(), "scada-diagram-configs");
    }

    #[test]
    fn test_storage_key_must_be_a_plain_file_name() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        for bad in ["../../../escaped", "plant/a", ".."] {
            let err = service.set("storage_key", bad).unwrap_err();
            assert!(matches!(err, ScadaError::Config(_)), "{} accepted", bad);
        }
        assert_eq!(service.get("storage_key").unwrap(), "scada-diagram-configs");

        service.set("storage_key", "plant-a").unwrap();
        assert_eq!(service.get("storage_key").unwrap(), "plant-a");
    }
}
