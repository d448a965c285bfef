//! Gate Error Types
//!
//! Gate-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    /// Wrong email or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Sign-in attempted before the confirmation link was followed
    #[error("Email address not confirmed")]
    EmailNotConfirmed,

    /// No usable session for this request
    #[error("Session not found or expired")]
    SessionInvalid,

    /// The auth service refused the registration (taken address, weak password)
    #[error("Sign up rejected: {0}")]
    SignUpRejected(String),

    /// The auth service is throttling requests
    #[error("Too many requests to the auth service")]
    RateLimited,

    /// Request input failed validation
    #[error("{0}")]
    Validation(AppError),

    /// Unexpected answer from the auth service
    #[error("Auth service error: {0}")]
    Upstream(String),

    /// The auth service did not answer in time
    #[error("Auth service timed out")]
    UpstreamTimeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::InvalidCredentials | GateError::SessionInvalid => ErrorKind::Unauthorized,
            GateError::EmailNotConfirmed => ErrorKind::Forbidden,
            GateError::SignUpRejected(_) => ErrorKind::UnprocessableEntity,
            GateError::RateLimited => ErrorKind::TooManyRequests,
            GateError::Validation(err) => err.kind(),
            GateError::Upstream(_) => ErrorKind::BadGateway,
            GateError::UpstreamTimeout => ErrorKind::GatewayTimeout,
            GateError::Database(_) | GateError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            GateError::Validation(err) => {
                let copy = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => copy.with_action(action.to_string()),
                    None => copy,
                }
            }
            // keep driver and upstream details out of the response body
            GateError::Database(_) | GateError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            GateError::Upstream(_) | GateError::UpstreamTimeout => {
                AppError::new(self.kind(), "The authentication service is unavailable")
                    .with_action("Please try again in a moment")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Whether the auth service itself failed, as opposed to rejecting the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, GateError::Upstream(_) | GateError::UpstreamTimeout)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GateError::Database(e) => {
                tracing::error!(error = %e, "Gate database error");
            }
            GateError::Internal(msg) => {
                tracing::error!(message = %msg, "Gate internal error");
            }
            GateError::Upstream(msg) => {
                tracing::error!(message = %msg, "Auth service error");
            }
            GateError::UpstreamTimeout => {
                tracing::error!("Auth service timed out");
            }
            GateError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            GateError::RateLimited => {
                tracing::warn!("Auth service rate limit hit");
            }
            _ => {
                tracing::debug!(error = %self, "Gate error");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for GateError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            GateError::Validation(err)
        } else {
            GateError::Internal(err.to_string())
        }
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GateError::UpstreamTimeout
        } else {
            GateError::Upstream(err.to_string())
        }
    }
}
