//! Value Object Module

pub mod email;
pub mod module_code;
pub mod score;

pub use email::Email;
pub use module_code::ModuleCode;
pub use score::Score;
