//! Signed-in user profile as returned by the login endpoint

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub avatar: String,
    pub email: String,
    pub role: String,
    /// JSON-encoded array of permission names
    pub permissions: String,
    pub role_id: String,
    pub is_role_device: bool,
    pub username: String,
    pub super_user: bool,
    pub manage_supers: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserData {
    /// Decode the permission list; anything unparseable means no permissions
    pub fn permission_list(&self) -> Vec<String> {
        if self.permissions.is_empty() {
            return Vec::new();
        }
        serde_json::from_str(&self.permissions).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserAbilityRules {
    pub id: String,
    pub name: String,
    pub permissions: String,
    pub description: String,
    pub is_default: bool,
    pub is_role_device: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a successful login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user_data: UserData,
    pub user_ability_rules: UserAbilityRules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_list_parses_json_array() {
        let user = UserData {
            permissions: r#"["scada.view","scada.edit"]"#.to_string(),
            ..Default::default()
        };
        assert_eq!(user.permission_list(), vec!["scada.view", "scada.edit"]);
    }

    #[test]
    fn test_permission_list_invalid_is_empty() {
        let user = UserData {
            permissions: "scada.view".to_string(),
            ..Default::default()
        };
        assert!(user.permission_list().is_empty());
        assert!(UserData::default().permission_list().is_empty());
    }

    #[test]
    fn test_auth_response_camel_case() {
        let json = r#"{
            "accessToken": "tok",
            "userData": {"id": "u1", "username": "op", "superUser": true, "roleId": "r1"},
            "userAbilityRules": {"id": "r1", "name": "Operator", "isDefault": true}
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok");
        assert_eq!(response.user_data.username, "op");
        assert!(response.user_data.super_user);
        assert_eq!(response.user_data.role_id, "r1");
        assert!(response.user_ability_rules.is_default);
    }
}
