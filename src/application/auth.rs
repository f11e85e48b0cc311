//! Session management use case

use crate::domain::{AuthResponse, UserData};
use crate::error::Result;
use crate::infrastructure::{SessionStore, StoredSession};
use tracing::info;

/// Service for reading and changing the signed-in session
pub struct AuthService {
    store: SessionStore,
}

impl AuthService {
    pub fn new(store: SessionStore) -> Self {
        AuthService { store }
    }

    /// Store token, profile and ability rules from a login response
    pub fn save_auth_data(&self, response: &AuthResponse) -> Result<()> {
        let session = StoredSession {
            access_token: response.access_token.clone(),
            user_data: Some(response.user_data.clone()),
            user_ability_rules: Some(response.user_ability_rules.clone()),
            expires_at: None,
        };
        self.store.save(&session)?;
        info!(user = %response.user_data.username, "Saved session");
        Ok(())
    }

    /// Forget the signed-in user
    pub fn clear_auth_data(&self) -> Result<()> {
        self.store.save(&StoredSession::default())?;
        info!("Cleared session");
        Ok(())
    }

    /// Signed in means a non-empty token and a user profile
    pub fn is_authenticated(&self) -> bool {
        let session = self.store.load();
        !session.access_token.is_empty() && session.user_data.is_some()
    }

    pub fn user_permissions(&self) -> Vec<String> {
        self.store
            .load()
            .user_data
            .map(|u| u.permission_list())
            .unwrap_or_default()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.user_permissions().iter().any(|p| p == permission)
    }

    pub fn current_user(&self) -> Option<UserData> {
        self.store.load().user_data
    }

    /// Current bearer token, if any
    pub fn access_token(&self) -> Option<String> {
        let token = self.store.load().access_token;
        (!token.is_empty()).then_some(token)
    }
}
