//! # keyward-form
//!
//! Schema-driven field forms.
//!
//! A [`FormSchema`] declares the fields of one form: their kind, default and
//! validation rules. A [`FieldForm`] is one mounted instance of a schema. It
//! holds the current values, remembers the initial values for
//! [`FieldForm::reset`], and publishes a [`FormEvent`] on the shared
//! [`EventBus`](keyward_eventbus::EventBus) after every committed edit.
//!
//! Validation never touches the displayed values: it only reports, either
//! the normalized value (trimmed strings, parsed integers) or every failing
//! field at once.

mod error;
mod event;
mod form;
mod options;
mod schema;

pub use error::FormError;
pub use event::FormEvent;
pub use form::FieldForm;
pub use options::FormOptions;
pub use schema::{FieldKind, FieldSpec, FormSchema};

/// JSON object holding one form's values, keyed by field.
pub type FormValues = serde_json::Map<String, serde_json::Value>;
