//! Manage Student Use Case
//!
//! Create, list, read and delete students.

use std::sync::Arc;

use kernel::id::StudentId;

use crate::domain::entity::Student;
use crate::domain::repository::StudentRepository;
use crate::domain::value_object::Email;
use crate::error::{GradebookError, GradebookResult};

/// Maximum length of names and usernames
const NAME_MAX_LENGTH: usize = 100;

/// Create student input
pub struct CreateStudentInput {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

pub struct ManageStudentUseCase<S>
where
    S: StudentRepository,
{
    student_repo: Arc<S>,
}

impl<S> ManageStudentUseCase<S>
where
    S: StudentRepository,
{
    pub fn new(student_repo: Arc<S>) -> Self {
        Self { student_repo }
    }

    pub async fn create(&self, input: CreateStudentInput) -> GradebookResult<Student> {
        let first_name = required("First name", &input.first_name)?;
        let last_name = required("Last name", &input.last_name)?;
        let username = required("Username", &input.username)?;
        let email = Email::new(input.email)?;

        let student_id = StudentId::new(input.id);
        if self.student_repo.exists_by_id(student_id).await? {
            return Err(GradebookError::StudentExists(student_id));
        }
        if self.student_repo.exists_by_username(username).await? {
            return Err(GradebookError::UsernameTaken);
        }
        if self.student_repo.exists_by_email(&email).await? {
            return Err(GradebookError::EmailTaken);
        }

        let student = Student::new(student_id, first_name, last_name, username, email);
        self.student_repo.create(&student).await?;

        tracing::info!(student_id = %student_id, username = %student.username, "Student created");

        Ok(student)
    }

    pub async fn list(&self) -> GradebookResult<Vec<Student>> {
        self.student_repo.list().await
    }

    pub async fn get(&self, student_id: StudentId) -> GradebookResult<Student> {
        self.student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(GradebookError::StudentNotFound(student_id))
    }

    /// Removes the student with all of its grades and registrations
    pub async fn delete(&self, student_id: StudentId) -> GradebookResult<()> {
        if !self.student_repo.delete(student_id).await? {
            return Err(GradebookError::StudentNotFound(student_id));
        }

        tracing::info!(student_id = %student_id, "Student deleted");

        Ok(())
    }
}

fn required<'a>(field: &str, value: &'a str) -> GradebookResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GradebookError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(GradebookError::Validation(format!(
            "{} must be at most {} characters",
            field, NAME_MAX_LENGTH
        )));
    }
    Ok(value)
}
