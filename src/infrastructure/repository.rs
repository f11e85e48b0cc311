//! Workspace repository: discovery and layout of the .scada directory

use crate::error::{Result, ScadaError};
use crate::infrastructure::config::WORKSPACE_DIR;
use crate::infrastructure::{Config, FileStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the workspace root explicitly
pub const ROOT_ENV: &str = "SCADA_ROOT";

/// Abstract repository for workspace operations
pub trait WorkspaceRepository {
    /// Get the root directory of this workspace
    fn root(&self) -> &Path;

    /// Load configuration from .scada/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .scada/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .scada directory exists
    fn is_initialized(&self) -> bool;

    /// Create .scada directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of WorkspaceRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Workspace named by `SCADA_ROOT`, else the nearest `.scada` above the current directory
    pub fn discover() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::locate(std::env::var_os(ROOT_ENV).map(PathBuf::from), &current_dir)
    }

    /// Resolve the workspace from an explicit root override or by searching upward from `start`.
    ///
    /// An override without a `.scada` directory is an error; there is no fallback search.
    pub fn locate(root_override: Option<PathBuf>, start: &Path) -> Result<Self> {
        if let Some(root) = root_override {
            if !Self::has_scada_dir(&root) {
                return Err(ScadaError::Config(format!(
                    "{} is set to '{}' but no {} directory found. \
                    Run 'scadastore init' in that directory or unset {}.",
                    ROOT_ENV,
                    root.display(),
                    WORKSPACE_DIR,
                    ROOT_ENV
                )));
            }
            return Ok(FileSystemRepository::new(root));
        }
        Self::discover_from(start)
    }

    /// Nearest ancestor of `start` (itself included) holding a `.scada` directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_scada_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| ScadaError::NotWorkspace(start.to_path_buf()))
    }

    fn has_scada_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    fn scada_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Key/value storage holding the persisted configuration collection
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.scada_dir().join("storage"))
    }

    /// Location of the signed-in session
    pub fn session_path(&self) -> PathBuf {
        self.scada_dir().join("session.json")
    }
}

impl WorkspaceRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_scada_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let scada_dir = self.scada_dir();

        if scada_dir.exists() {
            return Err(ScadaError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&scada_dir)?;
        fs::create_dir(scada_dir.join("storage"))?;
        Ok(())
    }
}
