//! Farm Error Types
//!
//! Farm-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Farm-specific result type alias
pub type FarmResult<T> = Result<T, FarmError>;

#[derive(Debug, Error)]
pub enum FarmError {
    #[error("Profile not found")]
    ProfileNotFound,

    /// Productions can only be registered once on-boarding is done
    #[error("Complete your profile before registering a production")]
    ProfileRequired,

    /// Missing, or owned by someone else
    #[error("Production not found")]
    ProductionNotFound,

    /// Missing, or its production is owned by someone else
    #[error("Coffee lot not found")]
    LotNotFound,

    #[error("Unknown city: {name} ({state})")]
    UnknownCity { name: String, state: String },

    #[error("Unknown coffee variety")]
    UnknownVariety,

    /// Request input failed validation
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FarmError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FarmError::ProfileNotFound
            | FarmError::ProductionNotFound
            | FarmError::LotNotFound => ErrorKind::NotFound,
            FarmError::ProfileRequired
            | FarmError::UnknownCity { .. }
            | FarmError::UnknownVariety => ErrorKind::UnprocessableEntity,
            FarmError::Validation(err) => err.kind(),
            FarmError::Database(_) | FarmError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            FarmError::Validation(err) => {
                let copy = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => copy.with_action(action.to_string()),
                    None => copy,
                }
            }
            FarmError::Database(_) | FarmError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            FarmError::ProfileRequired => AppError::new(self.kind(), self.to_string())
                .with_action("Fill in the profile form first"),
            FarmError::UnknownCity { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Pick a municipality from the catalog"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            FarmError::Database(e) => {
                tracing::error!(error = %e, "Farm database error");
            }
            FarmError::Internal(msg) => {
                tracing::error!(message = %msg, "Farm internal error");
            }
            FarmError::ProductionNotFound | FarmError::LotNotFound => {
                tracing::info!(error = %self, "Farm resource not found");
            }
            _ => {
                tracing::debug!(error = %self, "Farm error");
            }
        }
    }
}

impl IntoResponse for FarmError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for FarmError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            FarmError::Validation(err)
        } else {
            FarmError::Internal(err.to_string())
        }
    }
}
