//! Gradebook Backend Module
//!
//! Course administration: students, modules, registrations and grades.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, grade statistics, repository traits
//! - `application/` - Use cases, one per request
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - A student owns its registrations and grades; deleting the student deletes them
//! - At most one registration and one grade per (student, module) pair
//! - A grade can only be recorded for a module the student is registered for

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{GradebookError, GradebookResult};
pub use infra::memory::InMemoryGradebookRepository;
pub use infra::postgres::PgGradebookRepository;
pub use presentation::router::{gradebook_router, gradebook_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::services::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
