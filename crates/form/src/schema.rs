//! Form schemas: field declarations and whole-form validation

use keyward_validator::prelude::*;
use serde_json::Value;

use crate::FormValues;

/// How a field is edited and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line text, trimmed before validation.
    Text,
    /// Single-line secret (password input), trimmed before validation.
    Secret,
    /// Multi-line text (PEM keys, kubeconfig), kept verbatim.
    Multiline,
    /// Integer; numeric strings are accepted and parsed.
    Integer,
}

/// Declaration of one form field.
///
/// ```rust,ignore
/// let port = FieldSpec::integer("port").required().range(1, 65_535).default_value(22);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    key: &'static str,
    kind: FieldKind,
    required: bool,
    max_length: Option<usize>,
    url: bool,
    range: Option<(i64, i64)>,
    one_of: Option<&'static [&'static str]>,
    default: Value,
}

impl FieldSpec {
    fn new(key: &'static str, kind: FieldKind) -> Self {
        let default = match kind {
            FieldKind::Integer => Value::Null,
            _ => Value::String(String::new()),
        };
        Self {
            key,
            kind,
            required: false,
            max_length: None,
            url: false,
            range: None,
            one_of: None,
            default,
        }
    }

    /// Single-line text field.
    #[must_use]
    pub fn text(key: &'static str) -> Self {
        Self::new(key, FieldKind::Text)
    }

    /// Secret field.
    #[must_use]
    pub fn secret(key: &'static str) -> Self {
        Self::new(key, FieldKind::Secret)
    }

    /// Multi-line text field.
    #[must_use]
    pub fn multiline(key: &'static str) -> Self {
        Self::new(key, FieldKind::Multiline)
    }

    /// Integer field.
    #[must_use]
    pub fn integer(key: &'static str) -> Self {
        Self::new(key, FieldKind::Integer)
    }

    /// A blank value is an error.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// A blank value passes and skips the other rules.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Upper bound in chars.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Must be an absolute http(s) URL.
    #[must_use]
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    /// Inclusive integer bounds.
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Closed set of accepted strings.
    #[must_use]
    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.one_of = Some(allowed);
        self
    }

    /// Value used when the form is created empty.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Field key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Field kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether a blank value fails validation.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Default value.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Validates one raw value and returns its normalized form.
    pub fn check(&self, raw: Option<&Value>) -> Result<Value, ValidationError> {
        let checked = match self.kind {
            FieldKind::Integer => self.check_integer(raw),
            FieldKind::Text | FieldKind::Secret | FieldKind::Multiline => self.check_text(raw),
        };
        checked.map_err(|error| error.or_field(self.key))
    }

    fn check_text(&self, raw: Option<&Value>) -> Result<Value, ValidationError> {
        let text = match raw {
            None | Some(Value::Null) => "",
            Some(Value::String(text)) => text.as_str(),
            Some(_) => return Err(ValidationError::invalid_format(self.key, "string")),
        };
        let text = match self.kind {
            FieldKind::Multiline => text,
            _ => text.trim(),
        };

        if text.trim().is_empty() {
            return if self.required {
                Err(ValidationError::required(self.key))
            } else {
                Ok(Value::String(String::new()))
            };
        }

        if let Some(max) = self.max_length {
            max_length(max).validate(text)?;
        }
        if self.url {
            url().validate(text)?;
        }
        if let Some(allowed) = self.one_of {
            one_of(allowed).validate(text)?;
        }
        Ok(Value::String(text.to_string()))
    }

    fn check_integer(&self, raw: Option<&Value>) -> Result<Value, ValidationError> {
        let number = match raw {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(Value::String(text)) => Some(
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format(self.key, "integer"))?,
            ),
            Some(Value::Number(number)) => Some(
                number
                    .as_i64()
                    .ok_or_else(|| ValidationError::invalid_format(self.key, "integer"))?,
            ),
            Some(_) => return Err(ValidationError::invalid_format(self.key, "integer")),
        };

        let Some(number) = number else {
            return if self.required {
                Err(ValidationError::required(self.key))
            } else {
                Ok(Value::Null)
            };
        };

        if let Some((min, max)) = self.range {
            in_range(min, max).validate(&number)?;
        }
        Ok(Value::from(number))
    }
}

/// The field set of one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Creates a schema with no fields.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Schema name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields, in display order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by key.
    #[must_use]
    pub fn spec(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    /// The empty value of this form: every field at its default.
    #[must_use]
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .map(|spec| (spec.key.to_string(), spec.default.clone()))
            .collect()
    }

    /// Validates every field and returns the normalized values.
    ///
    /// All fields are checked; the error lists each failing field once.
    /// Keys the schema does not declare are dropped from the result.
    pub fn validate(&self, values: &FormValues) -> Result<FormValues, ValidationErrors> {
        let mut normalized = FormValues::new();
        let mut errors = ValidationErrors::new();

        for spec in &self.fields {
            match spec.check(values.get(spec.key)) {
                Ok(value) => {
                    normalized.insert(spec.key.to_string(), value);
                }
                Err(error) => errors.push(error),
            }
        }

        errors.into_result(normalized)
    }
}
