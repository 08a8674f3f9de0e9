use crate::entities::user_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "hunter2hunter2")]
    pub password: String,
    #[schema(example = "muscle gain")]
    pub fitness_goals: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub fitness_goals: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// User as returned to clients; the password hash never leaves the service
/// layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub fitness_goals: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

impl From<user_entity::Model> for UserResponse {
    fn from(user: user_entity::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            fitness_goals: user.fitness_goals,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_has_no_password_hash() {
        let user = user_entity::Model {
            id: 7,
            email: "ana@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            name: "Ana".to_string(),
            fitness_goals: None,
            is_admin: false,
            created_at: None,
            updated_at: None,
        };

        let v = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(v.get("password_hash").is_none());
        assert_eq!(v["email"], "ana@example.com");
    }

    #[test]
    fn test_change_password_request_is_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"currentPassword": "old-pass-123", "newPassword": "new-pass-456"}"#,
        )
        .unwrap();
        assert_eq!(req.current_password, "old-pass-123");
        assert_eq!(req.new_password, "new-pass-456");
    }
}
