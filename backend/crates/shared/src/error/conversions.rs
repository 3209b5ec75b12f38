//! Error conversions
//!
//! Database errors into [`AppError`] and [`AppError`] into HTTP responses.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error without consuming it
///
/// Returns the kind and a caller-safe message. Used both by the
/// `From<sqlx::Error>` conversion and by domain error types that keep the
/// original `sqlx::Error` around for logging.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            // Class 23: Integrity Constraint Violation
            Some("23000") => (ErrorKind::Conflict, "Integrity constraint violation"),
            Some("23001") => (ErrorKind::Conflict, "Restrict violation"),
            Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
            Some("23503") => (ErrorKind::Conflict, "Record is still referenced"),
            Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
            Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
            // Class 40: Transaction Rollback (serialization failure, deadlock)
            Some("40001") | Some("40P01") => {
                (ErrorKind::Conflict, "Concurrent update, please retry")
            }
            // Class 53: Insufficient Resources
            Some("53000") | Some("53100") | Some("53200") | Some("53300") => (
                ErrorKind::ServiceUnavailable,
                "Database resource exhausted",
            ),
            // Class 57: Operator Intervention
            Some("57000") | Some("57014") | Some("57P01") | Some("57P02") | Some("57P03") => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            _ => (ErrorKind::InternalServerError, "Database error"),
        },
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        sqlx::Error::Protocol(_) => (ErrorKind::InternalServerError, "Database protocol error"),
        sqlx::Error::Tls(_) => (ErrorKind::InternalServerError, "Database TLS error"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_row_not_found_classification() {
        let (kind, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(kind, ErrorKind::NotFound);

        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
        assert!(app_err.source().is_some());
    }
}
