//! Form edit errors

use thiserror::Error;

/// Why an edit was refused.
///
/// Validation failures are not edit errors: edits always commit, and
/// problems are reported by `validate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The form is disabled or loading.
    #[error("Form '{form}' is not accepting edits")]
    Disabled {
        /// Schema name
        form: &'static str,
    },

    /// The schema has no such field.
    #[error("Form '{form}' has no field '{field}'")]
    UnknownField {
        /// Schema name
        form: &'static str,
        /// Requested field key
        field: String,
    },

    /// The form was unmounted from its editor.
    #[error("Form '{form}' has been detached from its editor")]
    Detached {
        /// Schema name
        form: &'static str,
    },
}
