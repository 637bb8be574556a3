//! Format validators

use crate::error::ValidationError;
use crate::traits::Validate;

/// Validates an absolute `http`/`https` URL with a host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Url;

impl Validate for Url {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        match ::url::Url::parse(input) {
            Ok(parsed)
                if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() =>
            {
                Ok(())
            }
            _ => Err(ValidationError::invalid_format("", "url")),
        }
    }
}

/// Creates a [`Url`] validator.
#[must_use]
pub const fn url() -> Url {
    Url
}
