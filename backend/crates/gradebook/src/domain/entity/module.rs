//! Module Entity
//!
//! A taught course. Referenced by registrations and grades, owns nothing.

use crate::domain::value_object::ModuleCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub code: ModuleCode,
    pub name: String,
    /// Mandatory non-condonable: must be passed outright
    pub mnc: bool,
}

impl Module {
    pub fn new(code: ModuleCode, name: impl Into<String>, mnc: bool) -> Self {
        Self {
            code,
            name: name.into(),
            mnc,
        }
    }

    /// Modules are identified by code alone
    pub fn is(&self, code: &ModuleCode) -> bool {
        &self.code == code
    }
}
