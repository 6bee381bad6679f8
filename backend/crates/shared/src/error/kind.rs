//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;
use std::fmt;

/// Error classification
///
/// Every variant maps to exactly one status code, so the transport layer
/// never inspects messages to pick a response.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Gone.status_code(), 410);
/// assert_eq!(ErrorKind::UnprocessableEntity.as_str(), "Unprocessable Entity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    /// No authenticated requester
    Unauthorized,
    /// Requester lacks rights on the resource
    Forbidden,
    NotFound,
    Conflict,
    /// Resource exists but no longer accepts the operation
    Gone,
    UnprocessableEntity,
    InternalServerError,
    /// Transient backend failure
    ServiceUnavailable,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::Gone,
        ErrorKind::UnprocessableEntity,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    const fn status_and_reason(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::Gone => (410, "Gone"),
            ErrorKind::UnprocessableEntity => (422, "Unprocessable Entity"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.status_and_reason().0
    }

    /// Standard reason phrase, used as the problem title
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.status_and_reason().1
    }

    /// A caller may repeat the same request unchanged.
    ///
    /// Rejections (not found, expired, not owner, invalid option) never
    /// become valid on retry; only transient backend failures qualify.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct_errors() {
        let mut codes: Vec<u16> = ErrorKind::ALL.iter().map(|k| k.status_code()).collect();
        assert!(codes.iter().all(|&c| (400..600).contains(&c)));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_poll_facing_codes() {
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Gone.status_code(), 410);
        assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        let retryable: Vec<ErrorKind> = ErrorKind::ALL
            .into_iter()
            .filter(ErrorKind::is_retryable)
            .collect();
        assert_eq!(retryable, vec![ErrorKind::ServiceUnavailable]);
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&ErrorKind::UnprocessableEntity).unwrap();
        assert_eq!(json, "\"UNPROCESSABLE_ENTITY\"");
    }
}
