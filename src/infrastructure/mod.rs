//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod session;
pub mod storage;

pub use config::Config;
pub use repository::{FileSystemRepository, WorkspaceRepository};
pub use session::{SessionStore, StoredSession};
pub use storage::{validate_storage_key, FileStorage, KeyValueStorage, MemoryStorage};
