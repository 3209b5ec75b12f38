//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use kernel::id::{GradeId, RegistrationId, StudentId};

use crate::domain::entity::{Grade, Module, Registration, Student};
use crate::domain::value_object::{Email, ModuleCode};
use crate::error::GradebookResult;

/// Student repository trait
///
/// Loaded students always carry their registrations and grades.
#[trait_variant::make(StudentRepository: Send)]
pub trait LocalStudentRepository {
    /// Insert a new student (profile only)
    async fn create(&self, student: &Student) -> GradebookResult<()>;

    /// Find student by ID, with registrations and grades
    async fn find_by_id(&self, student_id: StudentId) -> GradebookResult<Option<Student>>;

    /// All students ordered by ID
    async fn list(&self) -> GradebookResult<Vec<Student>>;

    async fn exists_by_id(&self, student_id: StudentId) -> GradebookResult<bool>;

    async fn exists_by_username(&self, username: &str) -> GradebookResult<bool>;

    async fn exists_by_email(&self, email: &Email) -> GradebookResult<bool>;

    /// Delete the student together with all of its grades and registrations
    ///
    /// Returns whether a student was deleted.
    async fn delete(&self, student_id: StudentId) -> GradebookResult<bool>;
}

/// Module repository trait
#[trait_variant::make(ModuleRepository: Send)]
pub trait LocalModuleRepository {
    async fn create(&self, module: &Module) -> GradebookResult<()>;

    async fn find_by_code(&self, code: &ModuleCode) -> GradebookResult<Option<Module>>;

    /// All modules ordered by code
    async fn list(&self) -> GradebookResult<Vec<Module>>;

    /// Whether any registration or grade points at the module
    async fn is_referenced(&self, code: &ModuleCode) -> GradebookResult<bool>;

    /// Returns whether a module was deleted
    async fn delete(&self, code: &ModuleCode) -> GradebookResult<bool>;
}

/// Registration repository trait
#[trait_variant::make(RegistrationRepository: Send)]
pub trait LocalRegistrationRepository {
    /// Persist a new registration and return it with its generated ID
    ///
    /// A second registration for the same (student, module) pair fails
    /// with a conflict.
    async fn create(&self, registration: &Registration) -> GradebookResult<Registration>;

    /// Indexed lookup on the (module, student) pair
    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Registration>>;

    /// Registrations for a module in creation order
    async fn find_by_module(&self, code: &ModuleCode) -> GradebookResult<Vec<Registration>>;

    /// Delete a registration and, when given, the student's grade for the
    /// same module, atomically
    async fn withdraw(
        &self,
        registration_id: RegistrationId,
        grade_id: Option<GradeId>,
    ) -> GradebookResult<()>;
}

/// Result of [`GradeRepository::replace`]
#[derive(Debug, Clone)]
pub struct GradeReplacement {
    /// The newly inserted grade, with its generated ID
    pub grade: Grade,
    /// ID of the grade that was deleted to make room, if any
    pub replaced: Option<GradeId>,
}

/// Grade repository trait
#[trait_variant::make(GradeRepository: Send)]
pub trait LocalGradeRepository {
    async fn find_by_id(&self, grade_id: GradeId) -> GradebookResult<Option<Grade>>;

    /// Indexed lookup on the (module, student) pair
    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Grade>>;

    /// All grades ordered by ID
    async fn list(&self) -> GradebookResult<Vec<Grade>>;

    /// Delete any grade for the same (student, module) pair, then insert
    /// `grade`, in one transaction
    async fn replace(&self, grade: &Grade) -> GradebookResult<GradeReplacement>;

    /// Returns whether a grade was deleted
    async fn delete(&self, grade_id: GradeId) -> GradebookResult<bool>;
}

/// Everything the HTTP layer needs from one backing store
pub trait GradebookStore:
    StudentRepository
    + ModuleRepository
    + RegistrationRepository
    + GradeRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> GradebookStore for T where
    T: StudentRepository
        + ModuleRepository
        + RegistrationRepository
        + GradeRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
