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

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Token has already been used")]
    TokenAlreadyUsed,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Too many requests: {0}")]
    RateLimited(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// 机器可读的错误码，和响应里的 `error.code` 一致
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) | AppError::JwtError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::TokenAlreadyUsed => "TOKEN_ALREADY_USED",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::ConfigError(_) => "CONFIGURATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            AppError::ValidationError(_) | AppError::TokenAlreadyUsed | AppError::TokenExpired => {
                StatusCode::BAD_REQUEST
            }
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ConfigError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                "Invalid or expired token".to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::TokenAlreadyUsed | AppError::TokenExpired => self.to_string(),
            AppError::Forbidden(msg) => {
                log::warn!("Forbidden access: {msg}");
                msg.clone()
            }
            AppError::RateLimited(msg) => msg.clone(),
            AppError::ConfigError(msg) => {
                log::error!("Configuration error: {msg}");
                "Prize configuration error".to_string()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            AppError::InternalError(msg) => {
                log::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_redemption_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::NotFound("Invalid token".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::TokenAlreadyUsed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TokenExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ConfigError("8 prizes required".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("boom".into()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
