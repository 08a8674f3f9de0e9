use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Postgres surfaces unique-constraint violations through the driver message;
/// the register path relies on this to turn the race between the duplicate
/// check and the insert into a 409.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (actix_web::http::StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (actix_web::http::StatusCode::UNAUTHORIZED, msg.clone())
            }
            AppError::InvalidToken(msg) => {
                log::warn!("Token rejected: {msg}");
                (actix_web::http::StatusCode::FORBIDDEN, msg.clone())
            }
            AppError::PermissionDenied => {
                log::warn!("Permission denied");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "Admin access required".to_string(),
                )
            }
            AppError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                (actix_web::http::StatusCode::CONFLICT, msg.clone())
            }
            AppError::RateLimited => (
                actix_web::http::StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later".to_string(),
            ),
            AppError::DatabaseError(err) => {
                if is_unique_violation(err) {
                    log::warn!("Unique violation: {err}");
                    (
                        actix_web::http::StatusCode::CONFLICT,
                        "Resource already exists".to_string(),
                    )
                } else {
                    log::error!("Database error: {err}");
                    (
                        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "status": "error",
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                AppError::ValidationError("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::AuthError("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::InvalidToken("expired".into()),
                StatusCode::FORBIDDEN,
            ),
            (AppError::PermissionDenied, StatusCode::FORBIDDEN),
            (
                AppError::NotFound("missing".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Conflict("duplicate".into()),
                StatusCode::CONFLICT,
            ),
            (AppError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                AppError::InternalError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }

    #[test]
    fn test_unique_violation_detection() {
        let err = sea_orm::DbErr::Custom(
            "error returned from database: duplicate key value violates unique constraint \"uq_users_email\"".to_string(),
        );
        assert!(is_unique_violation(&err));

        let err = sea_orm::DbErr::Custom("connection refused".to_string());
        assert!(!is_unique_violation(&err));
    }
}
