//! Gallery Error Types
//!
//! This module provides domain-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Handlers return
//! these; the `IntoResponse` impl is the single normalization point
//! that converts them into the uniform external shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gallery-specific result type alias
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Gallery-specific error variants
#[derive(Debug, Error)]
pub enum GalleryError {
    /// One or more input constraints violated
    #[error("validation failed")]
    Validation(Vec<String>),

    /// A path identifier is not a well-formed UUID
    #[error("malformed identifier")]
    MalformedId,

    /// No session token on the request
    #[error("authorization required")]
    AuthRequired,

    /// Session token failed signature or expiry check
    #[error("invalid or expired token")]
    InvalidToken,

    /// Sign-in failed; deliberately identical for unknown email and
    /// wrong password
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Authenticated caller does not own the resource
    #[error("cannot modify another user's resource")]
    NotOwner,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Card not found
    #[error("card not found")]
    CardNotFound,

    /// Email uniqueness violated at persistence time
    #[error("user with this email already exists")]
    EmailTaken,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::Validation(_) | GalleryError::MalformedId => StatusCode::BAD_REQUEST,
            GalleryError::AuthRequired
            | GalleryError::InvalidToken
            | GalleryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            GalleryError::NotOwner => StatusCode::FORBIDDEN,
            GalleryError::UserNotFound | GalleryError::CardNotFound => StatusCode::NOT_FOUND,
            GalleryError::EmailTaken => StatusCode::CONFLICT,
            GalleryError::Database(_) | GalleryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GalleryError::Validation(_) | GalleryError::MalformedId => ErrorKind::BadRequest,
            GalleryError::AuthRequired
            | GalleryError::InvalidToken
            | GalleryError::InvalidCredentials => ErrorKind::Unauthorized,
            GalleryError::NotOwner => ErrorKind::Forbidden,
            GalleryError::UserNotFound | GalleryError::CardNotFound => ErrorKind::NotFound,
            GalleryError::EmailTaken => ErrorKind::Conflict,
            GalleryError::Database(_) | GalleryError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are reported generically; their detail only
    /// reaches the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            GalleryError::Validation(messages) => {
                AppError::bad_request("validation failed").with_validation_errors(messages.clone())
            }
            GalleryError::Database(_) | GalleryError::Internal(_) => {
                AppError::internal("internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GalleryError::Database(e) => {
                tracing::error!(error = %e, "gallery database error");
            }
            GalleryError::Internal(msg) => {
                tracing::error!(message = %msg, "gallery internal error");
            }
            GalleryError::InvalidCredentials => {
                tracing::warn!("failed sign-in attempt");
            }
            GalleryError::NotOwner => {
                tracing::warn!("rejected mutation of another user's resource");
            }
            _ => {
                tracing::debug!(error = %self, "gallery error");
            }
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for GalleryError {
    fn from(err: AppError) -> Self {
        GalleryError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for GalleryError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        GalleryError::Internal(err.to_string())
    }
}
