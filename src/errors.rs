use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::r2d2;
use serde_json::json;
use std::fmt;

use crate::feed::reader::FeedError;
use crate::ghl::client::GhlError;
use crate::models::location_setting::SettingsError;

/// Application-wide error types. Everything except bad client input is
/// reported to the caller as a 500 with the message text.
#[derive(Debug)]
pub enum AppError {
    // Client input
    InvalidInput { field: String, message: String },

    // Outbound calls
    NetworkError(String),
    ParseError(String),
    UpstreamError(String),
    AuthError(String),

    // Local
    ConfigurationError(String),
    DatabaseError,
    InternalError,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput { field, message } => write!(f, "Invalid {}: {}", field, message),

            AppError::NetworkError(message) => write!(f, "Network error: {}", message),
            AppError::ParseError(message) => write!(f, "Parse error: {}", message),
            // Platform messages pass through untouched
            AppError::UpstreamError(message) => write!(f, "{}", message),
            AppError::AuthError(message) => write!(f, "{}", message),

            AppError::ConfigurationError(message) => write!(f, "Configuration error: {}", message),
            AppError::DatabaseError => write!(f, "A database error occurred - please try again"),
            AppError::InternalError => write!(f, "Unexpected error"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidInput { .. } => {
                tracing::info!(error = %self, "Client error");
            }
            _ => {
                tracing::error!(error = ?self, "Server error");
            }
        }

        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_input(field: &str, message: &str) -> Self {
        AppError::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds the `InvalidInput` error for a set of absent request fields.
    pub fn missing_parameters(fields: &[&str]) -> Self {
        AppError::InvalidInput {
            field: fields.join(", "),
            message: "Missing parameters".to_string(),
        }
    }

    /// The uniform `{status, message}` body every error response carries.
    pub fn to_body(&self) -> serde_json::Value {
        let message = match self {
            AppError::InvalidInput { field, message } => format!("{}: {}", message, field),
            other => other.to_string(),
        };
        json!({
            "status": "error",
            "message": message
        })
    }
}

impl From<r2d2::PoolError> for AppError {
    fn from(err: r2d2::PoolError) -> Self {
        tracing::error!("Database connection pool error: {}", err);
        AppError::DatabaseError
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        tracing::warn!("Feed error: {}", err);
        match err {
            FeedError::Fetch { .. } | FeedError::Status { .. } => {
                AppError::NetworkError(err.to_string())
            }
            FeedError::Parse(_) => AppError::ParseError(err.to_string()),
        }
    }
}

impl From<GhlError> for AppError {
    fn from(err: GhlError) -> Self {
        match err {
            GhlError::Auth(message) => AppError::AuthError(message),
            GhlError::Network { .. } => AppError::NetworkError(err.to_string()),
            GhlError::Decode { .. } => AppError::ParseError(err.to_string()),
            GhlError::Upstream { message, .. } => AppError::UpstreamError(message),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        tracing::error!("Settings store error: {}", err);
        AppError::DatabaseError
    }
}
