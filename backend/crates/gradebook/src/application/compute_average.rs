//! Compute Average Use Case

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::repository::StudentRepository;
use crate::error::{GradebookError, GradebookResult};

pub struct ComputeAverageUseCase<S>
where
    S: StudentRepository,
{
    student_repo: Arc<S>,
}

impl<S> ComputeAverageUseCase<S>
where
    S: StudentRepository,
{
    pub fn new(student_repo: Arc<S>) -> Self {
        Self { student_repo }
    }

    /// Mean of all the student's scores, `0.0` when ungraded
    pub async fn execute(&self, student_id: StudentId) -> GradebookResult<f64> {
        let student = self
            .student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(GradebookError::StudentNotFound(student_id))?;

        let average = student.compute_average();

        tracing::debug!(
            student_id = %student_id,
            grades = student.grades().len(),
            average,
            "Average computed"
        );

        Ok(average)
    }
}
