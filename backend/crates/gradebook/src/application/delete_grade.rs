//! Delete Grade Use Case

use std::sync::Arc;

use kernel::id::GradeId;

use crate::domain::repository::GradeRepository;
use crate::error::{GradebookError, GradebookResult};

pub struct DeleteGradeUseCase<G>
where
    G: GradeRepository,
{
    grade_repo: Arc<G>,
}

impl<G> DeleteGradeUseCase<G>
where
    G: GradeRepository,
{
    pub fn new(grade_repo: Arc<G>) -> Self {
        Self { grade_repo }
    }

    /// Not idempotent: deleting an absent grade reports NotFound
    pub async fn execute(&self, grade_id: GradeId) -> GradebookResult<()> {
        let grade = self
            .grade_repo
            .find_by_id(grade_id)
            .await?
            .ok_or(GradebookError::GradeNotFound(grade_id))?;

        if !self.grade_repo.delete(grade_id).await? {
            return Err(GradebookError::GradeNotFound(grade_id));
        }

        tracing::info!(
            grade_id = %grade_id,
            student_id = %grade.student_id(),
            module_code = %grade.module().code,
            "Grade deleted"
        );

        Ok(())
    }
}
