//! Core traits for the validation system

use crate::error::ValidationError;

/// The trait every validator implements.
///
/// Generic over the input type so a string validator cannot be applied to an
/// integer by accident.
///
/// ```rust,ignore
/// use keyward_validator::{Validate, ValidationError};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.contains(' ') {
///             Err(ValidationError::invalid_format("", "no spaces"))
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

/// Combinator methods, implemented for every [`Validate`].
pub trait ValidateExt: Validate + Sized {
    /// Both validators must pass. Short-circuits on the first failure.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Combines two validators with logical AND.
///
/// The error of the first failing validator is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    /// Creates a new `And` combinator.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Extracts the left and right validators.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.left.validate(input)?;
        self.right.validate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{max_length, not_blank};

    #[test]
    fn and_reports_the_first_failure() {
        let validator = not_blank().and(max_length(3));

        assert!(validator.validate("abc").is_ok());
        assert_eq!(validator.validate(" ").unwrap_err().code, "required");
        assert_eq!(validator.validate("abcd").unwrap_err().code, "max_length");
    }
}
