//! Student Entity
//!
//! Aggregate root owning the student's registrations and grades.

use kernel::id::StudentId;
use thiserror::Error;

use crate::domain::entity::{grade::Grade, module::Module, registration::Registration};
use crate::domain::value_object::{Email, ModuleCode, Score};

/// Why a grade could not be read for a module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeLookupError {
    #[error("Student with Id {student_id} is not registered for module with code {module_code}")]
    NoRegistration {
        student_id: StudentId,
        module_code: ModuleCode,
    },

    #[error("There is no grade available for module {module_code}")]
    NoGradeAvailable { module_code: ModuleCode },
}

/// Student entity
///
/// Registrations and grades are kept in insertion order and can only be
/// added through [`Student::register_module`] and [`Student::add_grade`],
/// which stamp this student's id on the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across students
    pub username: String,
    /// Unique across students
    pub email: Email,
    registrations: Vec<Registration>,
    grades: Vec<Grade>,
}

impl Student {
    /// Create a student with no registrations or grades
    pub fn new(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        email: Email,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            email,
            registrations: Vec::new(),
            grades: Vec::new(),
        }
    }

    /// Attach persisted children to a freshly loaded student
    pub(crate) fn restore(
        mut self,
        registrations: Vec<Registration>,
        grades: Vec<Grade>,
    ) -> Self {
        self.registrations = registrations;
        self.grades = grades;
        self
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// One module per registration, in registration order
    pub fn registered_modules(&self) -> Vec<&Module> {
        self.registrations.iter().map(Registration::module).collect()
    }

    pub fn is_registered_for(&self, code: &ModuleCode) -> bool {
        self.registrations.iter().any(|r| r.module().is(code))
    }

    /// Register this student for `module`
    ///
    /// Duplicate registrations are not checked here; callers check
    /// [`Student::is_registered_for`] first.
    pub fn register_module(&mut self, module: Module) -> &Registration {
        self.registrations.push(Registration::new(self.id, module));
        &self.registrations[self.registrations.len() - 1]
    }

    /// Record a grade for `module`
    ///
    /// Does not deduplicate; callers remove any previous grade for the
    /// module first.
    pub fn add_grade(&mut self, module: Module, score: Score) -> &Grade {
        self.grades.push(Grade::new(self.id, module, score));
        &self.grades[self.grades.len() - 1]
    }

    /// Arithmetic mean of all scores, `0.0` with no grades
    pub fn compute_average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let sum: i64 = self
            .grades
            .iter()
            .map(|g| i64::from(g.score().value()))
            .sum();
        sum as f64 / self.grades.len() as f64
    }

    /// Grade for `module`
    ///
    /// With duplicates the most recently added matching grade wins.
    pub fn get_grade(&self, module: &Module) -> Result<&Grade, GradeLookupError> {
        if !self.is_registered_for(&module.code) {
            return Err(GradeLookupError::NoRegistration {
                student_id: self.id,
                module_code: module.code.clone(),
            });
        }

        self.grades
            .iter()
            .rev()
            .find(|g| g.module().is(&module.code))
            .ok_or_else(|| GradeLookupError::NoGradeAvailable {
                module_code: module.code.clone(),
            })
    }

    /// Remove the most recently added grade for `code`, if any
    ///
    /// Grades for other modules are never touched.
    pub fn remove_grade_for(&mut self, code: &ModuleCode) -> Option<Grade> {
        let index = self.grades.iter().rposition(|g| g.module().is(code))?;
        Some(self.grades.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(code: &str) -> Module {
        Module::new(ModuleCode::new(code).unwrap(), "Software Engineering", false)
    }

    fn student() -> Student {
        Student::new(
            StudentId::new(1),
            "Ada",
            "Lovelace",
            "alovelace",
            Email::new("ada@ucl.ac.uk").unwrap(),
        )
    }

    fn score(value: i32) -> Score {
        Score::new(value).unwrap()
    }

    #[test]
    fn test_average_of_no_grades_is_zero() {
        assert_eq!(student().compute_average(), 0.0);
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let mut s = student();
        for (code, value) in [("COMP0001", 50), ("COMP0002", 65), ("COMP0003", 72)] {
            s.register_module(module(code));
            s.add_grade(module(code), score(value));
        }
        let expected = (50.0 + 65.0 + 72.0) / 3.0;
        assert!((s.compute_average() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_register_module_sets_back_reference() {
        let mut s = student();
        let registration = s.register_module(module("COMP0010"));
        assert_eq!(registration.student_id(), StudentId::new(1));
        assert!(registration.id().is_none());
        assert!(s.is_registered_for(&ModuleCode::new("COMP0010").unwrap()));
    }

    #[test]
    fn test_add_grade_sets_back_reference() {
        let mut s = student();
        let grade = s.add_grade(module("COMP0010"), score(70));
        assert_eq!(grade.student_id(), StudentId::new(1));
        assert_eq!(s.grades().len(), 1);
    }

    #[test]
    fn test_get_grade_unregistered_module() {
        let s = student();
        let err = s.get_grade(&module("COMP0010")).unwrap_err();
        assert!(matches!(err, GradeLookupError::NoRegistration { .. }));
    }

    #[test]
    fn test_get_grade_registered_but_ungraded() {
        let mut s = student();
        s.register_module(module("COMP0010"));
        let err = s.get_grade(&module("COMP0010")).unwrap_err();
        assert!(matches!(err, GradeLookupError::NoGradeAvailable { .. }));
    }

    #[test]
    fn test_get_grade_returns_latest_match() {
        let mut s = student();
        s.register_module(module("COMP0010"));
        s.add_grade(module("COMP0010"), score(40));
        s.add_grade(module("COMP0010"), score(90));
        assert_eq!(s.get_grade(&module("COMP0010")).unwrap().score().value(), 90);
    }

    #[test]
    fn test_registered_modules_follow_registration_order() {
        let mut s = student();
        s.register_module(module("COMP0002"));
        s.register_module(module("COMP0001"));
        let codes: Vec<&str> = s
            .registered_modules()
            .iter()
            .map(|m| m.code.as_str())
            .collect();
        assert_eq!(codes, vec!["COMP0002", "COMP0001"]);
    }

    #[test]
    fn test_remove_grade_for_only_touches_matching_module() {
        let mut s = student();
        s.add_grade(module("COMP0001"), score(55));
        assert!(s.remove_grade_for(&ModuleCode::new("COMP0002").unwrap()).is_none());
        assert_eq!(s.grades().len(), 1);

        let removed = s.remove_grade_for(&ModuleCode::new("COMP0001").unwrap()).unwrap();
        assert_eq!(removed.score().value(), 55);
        assert!(s.grades().is_empty());
    }
}
