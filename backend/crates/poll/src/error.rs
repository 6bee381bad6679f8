//! Poll Error Types
//!
//! This module provides poll-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::is_transient_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::ValidationErrors;

/// Poll-specific result type alias
pub type PollResult<T> = Result<T, PollError>;

/// Poll-specific error variants
///
/// Callers branch on the variant, never on the message. Rejections
/// (`PollNotFound`, `NotOwner`, `PollExpired`, `InvalidOption`,
/// `Validation`) are final; only a transient `Database` error is worth
/// retrying.
#[derive(Debug, Error)]
pub enum PollError {
    /// Referenced poll does not exist (or was deleted concurrently)
    #[error("Poll not found")]
    PollNotFound,

    /// Requester is not the poll owner
    #[error("Only the poll owner can do this")]
    NotOwner,

    /// Poll expiry instant is not after the vote instant
    #[error("Poll has expired")]
    PollExpired,

    /// Option does not exist or belongs to another poll
    #[error("Option does not belong to the poll")]
    InvalidOption,

    /// Field-level input validation failed
    #[error("Invalid poll input: {0}")]
    Validation(ValidationErrors),

    /// No authenticated requester on an owner-only route
    #[error("Authentication required")]
    Unauthenticated,

    /// Store round trip failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PollError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::PollNotFound => ErrorKind::NotFound,
            PollError::NotOwner => ErrorKind::Forbidden,
            PollError::PollExpired => ErrorKind::Gone,
            PollError::InvalidOption | PollError::Validation(_) => ErrorKind::UnprocessableEntity,
            PollError::Unauthenticated => ErrorKind::Unauthorized,
            PollError::Database(e) if is_transient_sqlx(e) => ErrorKind::ServiceUnavailable,
            PollError::Database(_) | PollError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Transient store failure: the caller may retry with a fresh attempt
    pub fn is_transient(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PollError::Database(e) if is_transient_sqlx(e) => {
                tracing::warn!(error = %e, "Poll store transient failure");
            }
            PollError::Database(e) => {
                tracing::error!(error = %e, "Poll database error");
            }
            PollError::Internal(msg) => {
                tracing::error!(message = %msg, "Poll internal error");
            }
            PollError::NotOwner => {
                tracing::warn!("Poll operation by non-owner rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Poll request rejected");
            }
        }
    }
}

impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::Database(e) if is_transient_sqlx(&e) => AppError::from(e),
            PollError::Database(e) => AppError::internal("Poll storage failure").with_source(e),
            PollError::Validation(errors) => {
                AppError::unprocessable("Poll input is invalid").with_details(errors.to_json())
            }
            PollError::PollExpired => {
                AppError::gone(PollError::PollExpired.to_string()).with_action("Voting is closed")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<ValidationErrors> for PollError {
    fn from(errors: ValidationErrors) -> Self {
        PollError::Validation(errors)
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
