//! Register Student Use Case
//!
//! Enrols a student on a module.

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::entity::Registration;
use crate::domain::repository::{ModuleRepository, RegistrationRepository, StudentRepository};
use crate::domain::value_object::ModuleCode;
use crate::error::{GradebookError, GradebookResult};

/// Register student input
pub struct RegisterStudentInput {
    pub student_id: i64,
    pub module_code: String,
}

pub struct RegisterStudentUseCase<S, M, R>
where
    S: StudentRepository,
    M: ModuleRepository,
    R: RegistrationRepository,
{
    student_repo: Arc<S>,
    module_repo: Arc<M>,
    registration_repo: Arc<R>,
}

impl<S, M, R> RegisterStudentUseCase<S, M, R>
where
    S: StudentRepository,
    M: ModuleRepository,
    R: RegistrationRepository,
{
    pub fn new(student_repo: Arc<S>, module_repo: Arc<M>, registration_repo: Arc<R>) -> Self {
        Self {
            student_repo,
            module_repo,
            registration_repo,
        }
    }

    pub async fn execute(&self, input: RegisterStudentInput) -> GradebookResult<Registration> {
        let student_id = StudentId::new(input.student_id);
        let mut student = self
            .student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(GradebookError::StudentNotFound(student_id))?;

        let code = ModuleCode::new(input.module_code.clone())
            .map_err(|_| GradebookError::ModuleNotFound(input.module_code))?;
        let module = self
            .module_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| GradebookError::ModuleNotFound(code.to_string()))?;

        if student.is_registered_for(&module.code) {
            return Err(GradebookError::AlreadyRegistered);
        }

        let registration = student.register_module(module).clone();

        // The unique (student, module) index catches a concurrent duplicate
        let persisted = self
            .registration_repo
            .create(&registration)
            .await
            .map_err(|e| match e {
                GradebookError::Database(ref db) if is_unique_violation(db) => {
                    GradebookError::AlreadyRegistered
                }
                other => other,
            })?;

        tracing::info!(
            student_id = %student_id,
            module_code = %code,
            registration_id = ?persisted.id(),
            "Student registered for module"
        );

        Ok(persisted)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
