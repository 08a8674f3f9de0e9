use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope: `{"status": "success"|"error", "message", "data"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let v = serde_json::to_value(ApiResponse::success(serde_json::json!({"id": 1}))).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["data"]["id"], 1);
        assert!(v.get("message").is_none());
    }

    #[test]
    fn test_message_only_envelope_omits_data() {
        let v = serde_json::to_value(ApiResponse::message_only("Cart cleared")).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["message"], "Cart cleared");
        assert!(v.get("data").is_none());
    }
}
