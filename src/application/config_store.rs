//! Save/load/list/delete/import/export of diagram configurations
//!
//! The whole collection lives as one JSON array under a single storage key.
//! Every mutation reads the array, edits it and writes it back in full.
//! Entries are handled as raw JSON while mutating, so an entry this build
//! cannot decode survives unrelated saves and deletes.

use crate::domain::{
    parse_configuration, CanvasState, DiagramConfiguration, SavedComponent, SavedGroup,
};
use crate::error::{Result, ScadaError};
use crate::infrastructure::config::DEFAULT_STORAGE_KEY;
use crate::infrastructure::KeyValueStorage;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Durable store of named diagram snapshots
pub struct ConfigurationStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ConfigurationStore<S> {
    /// Store using the default collection key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        ConfigurationStore {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Save a snapshot under `name`, replacing any configuration with the same name.
    ///
    /// The snapshot is stamped with the current time and schema version.
    /// An unreadable existing collection is discarded and replaced.
    pub fn save(
        &self,
        name: &str,
        components: &[SavedComponent],
        groups: &[SavedGroup],
        canvas: CanvasState,
        description: Option<&str>,
    ) -> Result<DiagramConfiguration> {
        let config = DiagramConfiguration::new(
            name,
            components,
            groups,
            canvas,
            description,
            Utc::now().timestamp_millis() as f64,
        );
        self.put(&config)?;
        Ok(config)
    }

    /// Store a complete configuration as-is, keeping its timestamp and version.
    pub fn put(&self, config: &DiagramConfiguration) -> Result<()> {
        let entry = serde_json::to_value(config).map_err(|e| {
            error!(name = %config.name, error = %e, "Failed to serialize configuration");
            ScadaError::StorageWrite(e.to_string())
        })?;

        let mut entries = self.read_entries_lenient();
        entries.retain(|v| entry_name(v) != Some(config.name.as_str()));
        entries.push(entry);

        self.write_entries(&entries)?;
        info!(name = %config.name, total = entries.len(), "Saved configuration");
        Ok(())
    }

    /// Load the configuration named `name` (exact, case-sensitive match).
    pub fn load(&self, name: &str) -> Result<DiagramConfiguration> {
        let entries = self.read_entries().inspect_err(|e| {
            error!(name = %name, error = %e, "Failed to load configuration");
        })?;

        let entry = entries
            .into_iter()
            .find(|v| entry_name(v) == Some(name))
            .ok_or_else(|| ScadaError::NotFound(name.to_string()))?;

        serde_json::from_value(entry).map_err(|e| {
            error!(name = %name, error = %e, "Stored configuration is malformed");
            ScadaError::StorageRead(format!("configuration '{}' is malformed: {}", name, e))
        })
    }

    /// Every decodable configuration, newest first.
    ///
    /// Missing or corrupt storage yields an empty list.
    pub fn list_all(&self) -> Vec<DiagramConfiguration> {
        self.try_list_all().unwrap_or_else(|e| {
            error!(key = %self.key, error = %e, "Failed to get configurations");
            Vec::new()
        })
    }

    /// Like [`list_all`](Self::list_all), but surfaces a corrupt collection as an error.
    pub fn try_list_all(&self) -> Result<Vec<DiagramConfiguration>> {
        let entries = self.read_entries()?;
        Ok(entries
            .into_iter()
            .filter_map(|v| {
                let name = entry_name(&v).unwrap_or("<unnamed>").to_string();
                serde_json::from_value::<DiagramConfiguration>(v)
                    .inspect_err(|e| {
                        warn!(name = %name, error = %e, "Skipping malformed stored configuration")
                    })
                    .ok()
            })
            .collect())
    }

    /// Remove every configuration named `name`.
    ///
    /// Returns how many entries were removed; zero is not an error.
    pub fn delete(&self, name: &str) -> Result<usize> {
        let mut entries = self.read_entries_lenient();
        let before = entries.len();
        entries.retain(|v| entry_name(v) != Some(name));
        let removed = before - entries.len();

        self.write_entries(&entries)?;
        info!(name = %name, removed, "Deleted configuration");
        Ok(removed)
    }

    /// Raw stored entries sorted by timestamp, newest first (stable).
    fn read_entries(&self) -> Result<Vec<Value>> {
        let Some(stored) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        if stored.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<Value> = serde_json::from_str(&stored).map_err(|e| {
            ScadaError::StorageRead(format!("collection is not a JSON array: {}", e))
        })?;

        entries.sort_by(|a, b| entry_timestamp(b).total_cmp(&entry_timestamp(a)));
        Ok(entries)
    }

    fn read_entries_lenient(&self) -> Vec<Value> {
        self.read_entries().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Discarding unreadable configuration collection");
            Vec::new()
        })
    }

    fn write_entries(&self, entries: &[Value]) -> Result<()> {
        let serialized = serde_json::to_string(entries).map_err(|e| {
            error!(key = %self.key, error = %e, "Failed to serialize configurations");
            ScadaError::StorageWrite(e.to_string())
        })?;

        self.storage
            .set_item(&self.key, &serialized)
            .map_err(|e| match e {
                ScadaError::StorageWrite(_) => e,
                other => ScadaError::StorageWrite(other.to_string()),
            })
            .inspect_err(|e| error!(key = %self.key, error = %e, "Failed to write configurations"))
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

/// Entries without a numeric timestamp sort last
fn entry_timestamp(entry: &Value) -> f64 {
    entry
        .get("timestamp")
        .and_then(Value::as_f64)
        .unwrap_or(f64::NEG_INFINITY)
}

/// Write `config` as pretty JSON to `<dir>/<slug>.scada.json`.
pub fn export_configuration(config: &DiagramConfiguration, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(config.export_filename());

    let result = (|| -> Result<()> {
        let contents = serde_json::to_string_pretty(config)?;
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, contents)?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            info!(name = %config.name, path = %path.display(), "Exported configuration");
            Ok(path)
        }
        Err(e) => {
            error!(name = %config.name, error = %e, "Failed to export configuration");
            Err(e)
        }
    }
}

/// Read, parse and validate a configuration file.
///
/// The store is not modified; callers decide whether to `put` the result.
pub fn import_configuration(path: &Path) -> Result<DiagramConfiguration> {
    let file = fs::File::open(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read file");
        ScadaError::ImportRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    import_from_reader(file, path)
}

/// Import from any reader; `origin` is only used for diagnostics.
pub fn import_from_reader<R: Read>(mut reader: R, origin: &Path) -> Result<DiagramConfiguration> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|e| {
        error!(path = %origin.display(), error = %e, "Failed to read file");
        ScadaError::ImportRead {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    parse_configuration(&text).inspect_err(|e| match e {
        ScadaError::InvalidConfiguration(reason) => {
            error!(path = %origin.display(), reason = %reason, "Invalid configuration format")
        }
        other => {
            error!(path = %origin.display(), error = %other, "Failed to parse configuration file")
        }
    })
}
