//! Grade Entity

use kernel::id::{GradeId, StudentId};

use crate::domain::entity::module::Module;
use crate::domain::value_object::Score;

/// Grade entity
///
/// Created only through [`Student::add_grade`](super::Student::add_grade).
/// `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    id: Option<GradeId>,
    student_id: StudentId,
    module: Module,
    score: Score,
}

impl Grade {
    pub(crate) fn new(student_id: StudentId, module: Module, score: Score) -> Self {
        Self {
            id: None,
            student_id,
            module,
            score,
        }
    }

    /// Rebuild a persisted grade
    pub(crate) fn restore(id: GradeId, student_id: StudentId, module: Module, score: Score) -> Self {
        Self {
            id: Some(id),
            student_id,
            module,
            score,
        }
    }

    pub(crate) fn with_id(self, id: GradeId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn id(&self) -> Option<GradeId> {
        self.id
    }

    /// Owning student
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn score(&self) -> Score {
        self.score
    }
}
