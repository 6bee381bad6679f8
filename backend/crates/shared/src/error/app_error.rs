//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Message = Cow<'static, str>;

/// Unified application error
///
/// Domain crates keep their own `thiserror` enums and convert into this
/// type at the transport edge. Only `kind`, `message`, `action` and
/// `details` reach the client; `source` is kept for logs.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Poll not found");
/// assert_eq!(err.status_code(), 404);
///
/// let err = AppError::unprocessable("Invalid poll")
///     .with_details(serde_json::json!({ "question": ["must not be empty"] }));
/// assert!(err.details().is_some());
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Message,
    action: Option<Message>,
    details: Option<serde_json::Value>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            details: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn gone(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Gone, message)
    }

    pub fn unprocessable(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    pub fn internal(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn service_unavailable(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// What the caller should do next
    pub fn with_action(self, action: impl Into<Message>) -> Self {
        Self {
            action: Some(action.into()),
            ..self
        }
    }

    /// Structured payload rendered as `errors`
    pub fn with_details(self, details: serde_json::Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    /// Underlying error, never rendered
    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        match &self.action {
            Some(action) => write!(f, " (Action: {})", action),
            None => Ok(()),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Poll not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Poll not found");
        assert!(err.action().is_none());
        assert!(err.details().is_none());
    }

    #[test]
    fn test_constructors_pick_kind() {
        assert_eq!(AppError::bad_request("x").kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(AppError::gone("x").kind(), ErrorKind::Gone);
        assert_eq!(
            AppError::unprocessable("x").kind(),
            ErrorKind::UnprocessableEntity
        );
        assert_eq!(
            AppError::service_unavailable("x").kind(),
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn test_with_action_and_details() {
        let err = AppError::gone("Poll has expired")
            .with_action("Voting is closed")
            .with_details(serde_json::json!({ "expiresAt": "2020-01-01T00:00:00Z" }));
        assert_eq!(err.action(), Some("Voting is closed"));
        assert_eq!(
            err.details()
                .and_then(|d| d.get("expiresAt"))
                .and_then(|v| v.as_str()),
            Some("2020-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timeout");
        let err = AppError::service_unavailable("Storage unavailable").with_source(io_err);
        assert!(err.source().is_some());
        assert!(!err.to_string().contains("socket"));
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("Poll not found");
        assert_eq!(err.to_string(), "[Not Found] Poll not found");

        let err = AppError::gone("Poll has expired").with_action("Voting is closed");
        assert_eq!(
            err.to_string(),
            "[Gone] Poll has expired (Action: Voting is closed)"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::service_unavailable("db down").is_retryable());
        assert!(!AppError::internal("bug").is_retryable());
    }
}
