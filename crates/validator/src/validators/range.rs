//! Integer range validator

use crate::error::ValidationError;
use crate::traits::Validate;

/// Validates that an integer lies within `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InRange {
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
}

impl Validate for InRange {
    type Input = i64;

    fn validate(&self, input: &i64) -> Result<(), ValidationError> {
        if (self.min..=self.max).contains(input) {
            Ok(())
        } else {
            Err(ValidationError::out_of_range("", self.min, self.max, *input))
        }
    }
}

/// Creates an [`InRange`] validator.
#[must_use]
pub const fn in_range(min: i64, max: i64) -> InRange {
    InRange { min, max }
}
