//! Infrastructure Layer
//!
//! PostgreSQL repository and an in-memory store for tests and local runs.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryGradebookRepository;
pub use postgres::PgGradebookRepository;
