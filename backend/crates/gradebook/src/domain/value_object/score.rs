//! Score Value Object

use serde::Serialize;

use crate::error::{GradebookError, GradebookResult};

/// Grade score on the 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;

    pub fn new(value: i32) -> GradebookResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradebookError::Validation(format!(
                "Score must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(Score::new(0).unwrap().value(), 0);
        assert_eq!(Score::new(100).unwrap().value(), 100);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(Score::new(-1), Err(GradebookError::Validation(_))));
        assert!(matches!(Score::new(101), Err(GradebookError::Validation(_))));
    }
}
