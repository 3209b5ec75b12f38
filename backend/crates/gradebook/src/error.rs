//! Gradebook Error Types
//!
//! Domain-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx_error;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{GradeId, StudentId};
use thiserror::Error;

/// Gradebook-specific result type alias
pub type GradebookResult<T> = Result<T, GradebookError>;

/// Header carrying the explanation of a rejected registration
pub const ERROR_MESSAGE_HEADER: HeaderName = HeaderName::from_static("error-message");

/// Gradebook-specific error variants
#[derive(Debug, Error)]
pub enum GradebookError {
    #[error("Student {0} not found")]
    StudentNotFound(StudentId),

    #[error("Module {0} not found")]
    ModuleNotFound(String),

    #[error("Grade {0} not found")]
    GradeNotFound(GradeId),

    #[error("Student {student_id} has no registration for module {module_code}")]
    RegistrationNotFound {
        student_id: StudentId,
        module_code: String,
    },

    /// Duplicate registration for the same (student, module) pair
    #[error("Student is already registered for this module")]
    AlreadyRegistered,

    /// Grade submitted for a module the student is not registered for
    #[error("Student is not registered for this module")]
    NotRegistered,

    #[error("Student with id {0} already exists")]
    StudentExists(StudentId),

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("Module {0} already exists")]
    ModuleExists(String),

    /// Module still referenced by registrations or grades
    #[error("Module {0} is still referenced by registrations or grades")]
    ModuleInUse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GradebookError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradebookError::StudentNotFound(_)
            | GradebookError::ModuleNotFound(_)
            | GradebookError::GradeNotFound(_)
            | GradebookError::RegistrationNotFound { .. } => ErrorKind::NotFound,
            GradebookError::NotRegistered => ErrorKind::NotAcceptable,
            GradebookError::AlreadyRegistered
            | GradebookError::StudentExists(_)
            | GradebookError::UsernameTaken
            | GradebookError::EmailTaken
            | GradebookError::ModuleExists(_)
            | GradebookError::ModuleInUse(_) => ErrorKind::Conflict,
            GradebookError::Validation(_) => ErrorKind::BadRequest,
            GradebookError::Database(e) => classify_sqlx_error(e).0,
            GradebookError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Database details stay in the logs; callers only see the classified
    /// message.
    pub fn into_app_error(self) -> AppError {
        match self {
            GradebookError::Database(e) => AppError::from(e),
            GradebookError::Internal(_) => AppError::internal("Internal error"),
            GradebookError::NotRegistered => AppError::not_acceptable(self.to_string())
                .with_action("Register the student for the module before grading"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GradebookError::Database(e) => {
                if self.kind().is_server_error() {
                    tracing::error!(error = %e, "Gradebook database error");
                } else {
                    tracing::warn!(error = %e, "Gradebook constraint rejected request");
                }
            }
            GradebookError::Internal(msg) => {
                tracing::error!(message = %msg, "Gradebook internal error");
            }
            GradebookError::AlreadyRegistered | GradebookError::NotRegistered => {
                tracing::warn!(error = %self, "Registration rule rejected request");
            }
            _ => {
                tracing::debug!(error = %self, "Gradebook error");
            }
        }
    }
}

impl IntoResponse for GradebookError {
    fn into_response(self) -> Response {
        self.log();
        let error_message = matches!(self, GradebookError::AlreadyRegistered)
            .then(|| HeaderValue::from_str(&self.to_string()).ok())
            .flatten();
        let mut response = self.into_app_error().into_response();
        if let Some(value) = error_message {
            response.headers_mut().insert(ERROR_MESSAGE_HEADER, value);
        }
        response
    }
}
