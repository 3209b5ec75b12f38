//! Add Grade Use Case
//!
//! Records or replaces a student's grade for a module.

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::entity::Grade;
use crate::domain::repository::{GradeRepository, ModuleRepository, StudentRepository};
use crate::domain::value_object::{ModuleCode, Score};
use crate::error::{GradebookError, GradebookResult};

/// Add grade input
pub struct AddGradeInput {
    pub student_id: i64,
    pub module_code: String,
    pub score: i32,
}

/// Add grade use case
pub struct AddGradeUseCase<S, M, G>
where
    S: StudentRepository,
    M: ModuleRepository,
    G: GradeRepository,
{
    student_repo: Arc<S>,
    module_repo: Arc<M>,
    grade_repo: Arc<G>,
}

impl<S, M, G> AddGradeUseCase<S, M, G>
where
    S: StudentRepository,
    M: ModuleRepository,
    G: GradeRepository,
{
    pub fn new(student_repo: Arc<S>, module_repo: Arc<M>, grade_repo: Arc<G>) -> Self {
        Self {
            student_repo,
            module_repo,
            grade_repo,
        }
    }

    /// Upsert by delete-then-insert: an existing grade for the same
    /// (student, module) pair is removed, never updated in place.
    pub async fn execute(&self, input: AddGradeInput) -> GradebookResult<Grade> {
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

        if !student.is_registered_for(&module.code) {
            tracing::warn!(
                student_id = %student_id,
                module_code = %module.code,
                "Grade rejected: student not registered for module"
            );
            return Err(GradebookError::NotRegistered);
        }

        let score = Score::new(input.score)?;

        student.remove_grade_for(&module.code);
        let grade = student.add_grade(module, score).clone();

        let outcome = self.grade_repo.replace(&grade).await?;

        tracing::info!(
            student_id = %student_id,
            module_code = %code,
            score = score.value(),
            grade_id = ?outcome.grade.id(),
            replaced_grade_id = ?outcome.replaced,
            "Grade recorded"
        );

        Ok(outcome.grade)
    }
}
