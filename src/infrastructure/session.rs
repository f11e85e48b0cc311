//! File-backed session holder (.scada/session.json)

use crate::domain::{UserAbilityRules, UserData};
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How long a saved session stays valid
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Persisted session values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredSession {
    pub access_token: String,
    pub user_data: Option<UserData>,
    pub user_ability_rules: Option<UserAbilityRules>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        SessionStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current session.
    ///
    /// A missing, expired or unreadable file reads as an empty session.
    pub fn load(&self) -> StoredSession {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return StoredSession::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return StoredSession::default();
            }
        };

        let session: StoredSession = match serde_json::from_str(&contents) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                return StoredSession::default();
            }
        };

        if session.is_expired(Utc::now()) {
            info!(path = %self.path.display(), "Session expired");
            return StoredSession::default();
        }

        session
    }

    /// Persist `session`, stamping a fresh expiry
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        let mut stamped = session.clone();
        stamped.expires_at = Some(Utc::now() + Duration::days(SESSION_MAX_AGE_DAYS));

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(&stamped)?)?;
        Ok(())
    }
}
