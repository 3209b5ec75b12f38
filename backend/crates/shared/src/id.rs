//! Common ID Types
//!
//! Type-safe integer ID wrappers for persisted records.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper over a database `BIGINT`
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type StudentId = Id<markers::Student>;
///
/// let id = StudentId::new(1);
/// assert_eq!(id.get(), 1);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls keep the marker type free of trait bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Student IDs (assigned by the university, not generated)
    pub struct Student;

    /// Marker for Registration IDs (identity-generated)
    pub struct Registration;

    /// Marker for Grade IDs (identity-generated)
    pub struct Grade;
}

/// Type aliases for common IDs
pub type StudentId = Id<markers::Student>;
pub type RegistrationId = Id<markers::Registration>;
pub type GradeId = Id<markers::Grade>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let grade_id: GradeId = Id::new(7);
        let registration_id: RegistrationId = Id::new(7);

        // Same value, different types; they only meet as raw integers
        let g: i64 = grade_id.into();
        let r: i64 = registration_id.into();
        assert_eq!(g, r);
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = StudentId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: StudentId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_ordering() {
        assert!(GradeId::new(1) < GradeId::new(2));
        assert_eq!(format!("{}", StudentId::new(5)), "5");
        assert_eq!(format!("{:?}", StudentId::new(5)), "Id(5)");
    }
}
