//! Closed-set validator

use crate::error::ValidationError;
use crate::traits::Validate;

/// Validates that a string is one of a fixed set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OneOf {
    /// Allowed values, compared exactly.
    pub allowed: &'static [&'static str],
}

impl Validate for OneOf {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.allowed.contains(&input) {
            Ok(())
        } else {
            Err(ValidationError::not_allowed("", self.allowed))
        }
    }
}

/// Creates a [`OneOf`] validator.
#[must_use]
pub const fn one_of(allowed: &'static [&'static str]) -> OneOf {
    OneOf { allowed }
}
