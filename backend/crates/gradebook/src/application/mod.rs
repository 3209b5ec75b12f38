//! Application Layer
//!
//! Use cases orchestrating repositories and domain operations, one per
//! request.

pub mod add_grade;
pub mod compute_average;
pub mod delete_grade;
pub mod delete_registration;
pub mod list_grades;
pub mod manage_module;
pub mod manage_student;
pub mod module_details;
pub mod register_student;
pub mod student_details;

// Re-exports
pub use add_grade::{AddGradeInput, AddGradeUseCase};
pub use compute_average::ComputeAverageUseCase;
pub use delete_grade::DeleteGradeUseCase;
pub use delete_registration::DeleteRegistrationUseCase;
pub use list_grades::ListGradesUseCase;
pub use manage_module::{CreateModuleInput, ManageModuleUseCase};
pub use manage_student::{CreateStudentInput, ManageStudentUseCase};
pub use module_details::{ModuleDetailsOutput, ModuleDetailsUseCase};
pub use register_student::{RegisterStudentInput, RegisterStudentUseCase};
pub use student_details::{StudentDetailsOutput, StudentDetailsUseCase};
