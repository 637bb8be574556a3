//! String length validators
//!
//! Length is measured in Unicode scalar values (chars), so a 64-character
//! limit means the same thing for ASCII and CJK input.

use crate::error::ValidationError;
use crate::traits::Validate;

// ============================================================================
// NOT BLANK
// ============================================================================

/// Validates that a string contains something other than whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NotBlank;

impl Validate for NotBlank {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.trim().is_empty() {
            Err(ValidationError::required(""))
        } else {
            Ok(())
        }
    }
}

/// Creates a [`NotBlank`] validator.
#[must_use]
pub const fn not_blank() -> NotBlank {
    NotBlank
}

// ============================================================================
// MIN LENGTH
// ============================================================================

/// Validates that a string has at least `min` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLength {
    /// Minimum length (inclusive).
    pub min: usize,
}

impl Validate for MinLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let actual = input.chars().count();
        if actual >= self.min {
            Ok(())
        } else {
            Err(ValidationError::min_length("", self.min, actual))
        }
    }
}

/// Creates a [`MinLength`] validator.
#[must_use]
pub const fn min_length(min: usize) -> MinLength {
    MinLength { min }
}

// ============================================================================
// MAX LENGTH
// ============================================================================

/// Validates that a string does not exceed `max` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLength {
    /// Maximum length (inclusive).
    pub max: usize,
}

impl Validate for MaxLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let actual = input.chars().count();
        if actual <= self.max {
            Ok(())
        } else {
            Err(ValidationError::max_length("", self.max, actual))
        }
    }
}

/// Creates a [`MaxLength`] validator.
#[must_use]
pub const fn max_length(max: usize) -> MaxLength {
    MaxLength { max }
}
