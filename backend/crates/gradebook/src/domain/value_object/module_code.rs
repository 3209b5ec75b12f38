//! Module Code Value Object
//!
//! The natural key of a module, e.g. `COMP0010`.

use serde::Serialize;
use std::fmt;

use crate::error::{GradebookError, GradebookResult};

const MODULE_CODE_MAX_LENGTH: usize = 32;

/// Module code (natural primary key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleCode(String);

impl ModuleCode {
    /// Create a module code with validation
    ///
    /// Codes travel in URL paths, so whitespace and `/` are rejected.
    pub fn new(code: impl Into<String>) -> GradebookResult<Self> {
        let code = code.into().trim().to_string();

        if code.is_empty() {
            return Err(GradebookError::Validation(
                "Module code cannot be empty".to_string(),
            ));
        }

        if code.chars().count() > MODULE_CODE_MAX_LENGTH {
            return Err(GradebookError::Validation(format!(
                "Module code must be at most {} characters",
                MODULE_CODE_MAX_LENGTH
            )));
        }

        if code.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(GradebookError::Validation(
                "Module code cannot contain whitespace or '/'".to_string(),
            ));
        }

        Ok(Self(code))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
