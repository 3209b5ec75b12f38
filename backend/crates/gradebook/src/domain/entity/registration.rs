//! Registration Entity
//!
//! Enrollment of one student in one module.

use kernel::id::{RegistrationId, StudentId};

use crate::domain::entity::module::Module;

/// Registration entity
///
/// Created only through [`Student::register_module`](super::Student::register_module);
/// the owning student is fixed at creation. `id` is `None` until the store
/// assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    id: Option<RegistrationId>,
    student_id: StudentId,
    module: Module,
}

impl Registration {
    pub(crate) fn new(student_id: StudentId, module: Module) -> Self {
        Self {
            id: None,
            student_id,
            module,
        }
    }

    /// Rebuild a persisted registration
    pub(crate) fn restore(id: RegistrationId, student_id: StudentId, module: Module) -> Self {
        Self {
            id: Some(id),
            student_id,
            module,
        }
    }

    pub(crate) fn with_id(self, id: RegistrationId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn id(&self) -> Option<RegistrationId> {
        self.id
    }

    /// Owning student
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn module(&self) -> &Module {
        &self.module
    }
}
