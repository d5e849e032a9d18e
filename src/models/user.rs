use serde::{Deserialize, Serialize};

use super::enums::AuthStatus;

/// Stored account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

/// Body of `POST /signup` and `POST /login`.
///
/// Login clients send a placeholder `custom_id`, so it is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub custom_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: AuthStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Error,
            message: message.into(),
            user_id: None,
            email: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Success,
            message: message.into(),
            user_id: None,
            email: None,
        }
    }

    pub fn logged_in(user: &UserRecord) -> Self {
        Self {
            status: AuthStatus::Success,
            message: "Login successful".to_string(),
            user_id: Some(user.id.clone()),
            email: Some(user.email.clone()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AuthStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_without_custom_id_parses() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"pw"}"#).unwrap();
        assert!(req.custom_id.is_empty());
    }

    #[test]
    fn error_response_omits_user_fields() {
        let json = serde_json::to_value(AuthResponse::error("nope")).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("user_id").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn login_response_carries_identity() {
        let user = UserRecord {
            id: "NC-01".into(),
            email: "a@b.c".into(),
            created_at: "2026-01-01 00:00:00".into(),
        };
        let json = serde_json::to_value(AuthResponse::logged_in(&user)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["user_id"], "NC-01");
        assert_eq!(json["email"], "a@b.c");
    }
}
