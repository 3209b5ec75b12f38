//! Delete Registration Use Case
//!
//! Withdraws a student from a module, dropping the grade they hold for it.

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::repository::{ModuleRepository, RegistrationRepository, StudentRepository};
use crate::domain::value_object::ModuleCode;
use crate::error::{GradebookError, GradebookResult};

pub struct DeleteRegistrationUseCase<S, M, R>
where
    S: StudentRepository,
    M: ModuleRepository,
    R: RegistrationRepository,
{
    student_repo: Arc<S>,
    module_repo: Arc<M>,
    registration_repo: Arc<R>,
}

impl<S, M, R> DeleteRegistrationUseCase<S, M, R>
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

    /// Grades for other modules are left untouched
    pub async fn execute(&self, student_id: StudentId, module_code: String) -> GradebookResult<()> {
        let mut student = self
            .student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(GradebookError::StudentNotFound(student_id))?;

        let code = ModuleCode::new(module_code.clone())
            .map_err(|_| GradebookError::ModuleNotFound(module_code))?;
        let module = self
            .module_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| GradebookError::ModuleNotFound(code.to_string()))?;

        let registration = self
            .registration_repo
            .find_by_module_and_student(&module.code, student_id)
            .await?
            .ok_or_else(|| GradebookError::RegistrationNotFound {
                student_id,
                module_code: module.code.to_string(),
            })?;
        let registration_id = registration.id().ok_or_else(|| {
            GradebookError::Internal("Persisted registration has no id".to_string())
        })?;

        let removed_grade = student.remove_grade_for(&module.code);

        self.registration_repo
            .withdraw(registration_id, removed_grade.as_ref().and_then(|g| g.id()))
            .await?;

        tracing::info!(
            student_id = %student_id,
            module_code = %module.code,
            registration_id = %registration_id,
            removed_grade_id = ?removed_grade.and_then(|g| g.id()),
            "Registration deleted"
        );

        Ok(())
    }
}
