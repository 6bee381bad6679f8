//! Error conversions - From implementations for common error types
//!
//! Store error classification and the HTTP rendering of [`AppError`].

use super::app_error::AppError;

/// SQLSTATE codes for failures that may succeed when the whole unit is retried.
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub fn is_transient_sqlstate(code: &str) -> bool {
    matches!(
        code,
        // Class 40 - Transaction Rollback
        "40001" | "40P01"
        // Class 53 - Insufficient Resources
        | "53000" | "53100" | "53200" | "53300"
        // Class 57 - Operator Intervention
        | "57000" | "57014" | "57P01" | "57P02" | "57P03"
        // Class 08 - Connection Exception
        | "08000" | "08003" | "08006"
    )
}

/// Whether a sqlx error is a transient store failure (retryable by the caller)
#[cfg(feature = "sqlx")]
pub fn is_transient_sqlx(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| is_transient_sqlstate(code.as_ref()))
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_transient_sqlx(&err) {
            return AppError::service_unavailable("Storage temporarily unavailable")
                .with_action("Please retry shortly")
                .with_source(err);
        }

        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.code().as_deref() {
                    // Class 23 - Integrity Constraint Violation
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Protocol(_) => {
                AppError::internal("Database protocol error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
            "errors": self.details(),
        });

        if self.is_retryable() {
            (status, [(header::RETRY_AFTER, "1")], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}
