//! String key/value storage backends
//!
//! The configuration store never touches the filesystem directly; it reads
//! and writes whole values through [`KeyValueStorage`]. Backends do no
//! locking, so two writers racing on the same key can lose an update.

use crate::error::{Result, ScadaError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Get/set a string value by key
pub trait KeyValueStorage {
    /// Read the value under `key`, or `None` if it was never written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Check that `key` can name a file on its own.
///
/// Allowed: ASCII letters, digits, `-`, `_` and `.`, not starting with `.`.
/// Path separators and `..` are therefore rejected.
pub fn validate_storage_key(key: &str) -> std::result::Result<(), String> {
    if key.is_empty() {
        return Err("storage key cannot be empty".to_string());
    }
    if key.starts_with('.') {
        return Err(format!("storage key '{}' cannot start with '.'", key));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(format!(
            "storage key '{}' contains '{}'; use letters, digits, '-', '_' or '.'",
            key, bad
        ));
    }
    Ok(())
}

/// In-memory storage, optionally limited to a byte quota across all values
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys plus values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStorage {
            items: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| ScadaError::StorageRead("storage lock poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| ScadaError::StorageWrite("storage lock poisoned".to_string()))?;

        if let Some(quota) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(ScadaError::StorageWrite(format!(
                    "quota exceeded ({} of {} bytes)",
                    needed, quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: each key is a `<key>.json` file in one directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`; keys that are not plain file names are refused
    fn path_for(&self, key: &str) -> std::result::Result<PathBuf, String> {
        validate_storage_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key).map_err(ScadaError::StorageRead)?;
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScadaError::StorageRead(e.to_string())),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the target,
    /// then rename it into place.
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let write_err = |e: std::io::Error| ScadaError::StorageWrite(e.to_string());
        let path = self.path_for(key).map_err(ScadaError::StorageWrite)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(write_err)?;
        }

        let tmp_path = self
            .dir
            .join(format!("{}.json.scada-tmp-{}", key, std::process::id()));

        fs::write(&tmp_path, value).map_err(write_err)?;

        // rename does not overwrite on Windows
        if cfg!(windows) && path.exists() {
            fs::remove_file(&path).map_err(write_err)?;
        }

        fs::rename(&tmp_path, &path).map_err(write_err)
    }
}
