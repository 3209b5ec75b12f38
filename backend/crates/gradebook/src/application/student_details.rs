//! Student Details Use Case

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::entity::Student;
use crate::domain::repository::StudentRepository;
use crate::error::{GradebookError, GradebookResult};

/// A student with the modules they are registered for
#[derive(Debug, Clone)]
pub struct StudentDetailsOutput {
    pub student: Student,
}

pub struct StudentDetailsUseCase<S>
where
    S: StudentRepository,
{
    student_repo: Arc<S>,
}

impl<S> StudentDetailsUseCase<S>
where
    S: StudentRepository,
{
    pub fn new(student_repo: Arc<S>) -> Self {
        Self { student_repo }
    }

    pub async fn execute(&self, student_id: StudentId) -> GradebookResult<StudentDetailsOutput> {
        let student = self
            .student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(GradebookError::StudentNotFound(student_id))?;

        tracing::debug!(
            student_id = %student_id,
            registrations = student.registrations().len(),
            grades = student.grades().len(),
            "Student details loaded"
        );

        Ok(StudentDetailsOutput { student })
    }
}
