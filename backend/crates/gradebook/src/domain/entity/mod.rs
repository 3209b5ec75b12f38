//! Entity Module

pub mod grade;
pub mod module;
pub mod registration;
pub mod student;

pub use grade::Grade;
pub use module::Module;
pub use registration::Registration;
pub use student::{GradeLookupError, Student};
