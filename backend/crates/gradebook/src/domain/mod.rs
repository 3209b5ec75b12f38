//! Domain Layer
//!
//! Contains entities, value objects, grade statistics and repository traits.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{Grade, GradeLookupError, Module, Registration, Student};
pub use repository::{
    GradeRepository, GradebookStore, ModuleRepository, RegistrationRepository, StudentRepository,
};
