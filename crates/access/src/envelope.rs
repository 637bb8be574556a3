//! Envelope fields: the parts of an access record every provider shares

use keyward_validator::prelude::*;

use crate::provider::ProviderType;

/// Longest accepted record name, in chars.
pub const MAX_NAME_LEN: usize = 64;

/// Current envelope values, valid or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub name: Option<String>,
    pub provider: Option<ProviderType>,
}

/// Envelope values after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEnvelope {
    /// Trimmed name.
    pub name: String,
    pub provider: ProviderType,
}

impl Envelope {
    /// Checks both fields and reports every failure.
    pub fn validate(&self) -> Result<ValidEnvelope, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.as_deref().unwrap_or_default().trim();
        if let Err(error) = not_blank()
            .and(max_length(MAX_NAME_LEN))
            .validate(name)
        {
            errors.push(error.or_field("name"));
        }

        if self.provider.is_none() {
            errors.push(ValidationError::required("configType"));
        }

        match self.provider {
            Some(provider) if errors.is_empty() => Ok(ValidEnvelope {
                name: name.to_string(),
                provider,
            }),
            _ => Err(errors),
        }
    }
}
