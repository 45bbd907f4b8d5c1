use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Signed-in user (`/api/auth/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_user() {
        let info: UserInfo = serde_json::from_str(r#"{"id":3,"username":"ravi"}"#).unwrap();
        assert_eq!(info.role, Role::User);
        assert!(!info.is_admin());
    }

    #[test]
    fn admin_role_parses() {
        let info: UserInfo =
            serde_json::from_str(r#"{"id":1,"username":"root","role":"admin"}"#).unwrap();
        assert!(info.is_admin());
    }
}
