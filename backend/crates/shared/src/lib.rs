//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every backend crate agrees on:
//! - Error classification and the unified [`error::app_error::AppError`]
//! - Typed integer identifiers for persisted records
//!
//! Only things with a stable meaning across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
