//! Module Details Use Case
//!
//! Aggregates the students registered for a module with their grade
//! statistics.

use std::sync::Arc;

use crate::domain::entity::{Module, Student};
use crate::domain::repository::{ModuleRepository, RegistrationRepository, StudentRepository};
use crate::domain::services::ModuleStatistics;
use crate::domain::value_object::ModuleCode;
use crate::error::{GradebookError, GradebookResult};

/// Module details output
#[derive(Debug, Clone)]
pub struct ModuleDetailsOutput {
    pub module: Module,
    /// One entry per registration, in registration order
    pub students: Vec<Student>,
    pub statistics: ModuleStatistics,
}

/// Module details use case
pub struct ModuleDetailsUseCase<S, M, R>
where
    S: StudentRepository,
    M: ModuleRepository,
    R: RegistrationRepository,
{
    student_repo: Arc<S>,
    module_repo: Arc<M>,
    registration_repo: Arc<R>,
}

impl<S, M, R> ModuleDetailsUseCase<S, M, R>
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

    pub async fn execute(&self, module_code: String) -> GradebookResult<ModuleDetailsOutput> {
        let code = ModuleCode::new(module_code.clone())
            .map_err(|_| GradebookError::ModuleNotFound(module_code))?;
        let module = self
            .module_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| GradebookError::ModuleNotFound(code.to_string()))?;

        let registrations = self.registration_repo.find_by_module(&code).await?;

        let mut students = Vec::with_capacity(registrations.len());
        let mut statistics = ModuleStatistics::default();

        for registration in &registrations {
            let Some(student) = self
                .student_repo
                .find_by_id(registration.student_id())
                .await?
            else {
                tracing::warn!(
                    student_id = %registration.student_id(),
                    module_code = %code,
                    "Registration points at a missing student"
                );
                continue;
            };

            // Registered but ungraded students still count as students
            match student.get_grade(&module) {
                Ok(grade) => statistics.record(grade.score()),
                Err(e) => tracing::debug!(student_id = %student.id(), reason = %e, "Skipping ungraded student"),
            }

            students.push(student);
        }

        tracing::info!(
            module_code = %code,
            students = students.len(),
            total_grades = statistics.total_grades(),
            "Module details computed"
        );

        Ok(ModuleDetailsOutput {
            module,
            students,
            statistics,
        })
    }
}
