//! List Grades Use Case

use std::sync::Arc;

use kernel::id::GradeId;

use crate::domain::entity::Grade;
use crate::domain::repository::GradeRepository;
use crate::error::{GradebookError, GradebookResult};

pub struct ListGradesUseCase<G>
where
    G: GradeRepository,
{
    grade_repo: Arc<G>,
}

impl<G> ListGradesUseCase<G>
where
    G: GradeRepository,
{
    pub fn new(grade_repo: Arc<G>) -> Self {
        Self { grade_repo }
    }

    pub async fn list(&self) -> GradebookResult<Vec<Grade>> {
        self.grade_repo.list().await
    }

    pub async fn get(&self, grade_id: GradeId) -> GradebookResult<Grade> {
        self.grade_repo
            .find_by_id(grade_id)
            .await?
            .ok_or(GradebookError::GradeNotFound(grade_id))
    }
}
