//! Error types for the access editor

use keyward_form::FormError;
use keyward_validator::ValidationErrors;
use thiserror::Error;

use crate::model::AccessId;

/// Errors surfaced by the access editor.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A provider tag outside the closed set reached the registry.
    ///
    /// Unreachable through the typed API; hosts should render a hard error
    /// state instead of a field error.
    #[error("Unknown provider type: '{0}'")]
    UnknownProviderType(String),

    /// One or both form halves failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// An edit was refused by a form.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The payload form was replaced while its validation was pending.
    #[error("Validation was superseded by a provider type change")]
    Superseded,

    /// The editor has no model yet.
    #[error("Access editor is not ready, call set_model first")]
    NotReady,

    /// An edit-mode submission had no record id.
    #[error("Cannot update an access record without an id")]
    MissingId,
}

impl AccessError {
    /// Field errors, when this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns true for the programming-error class.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownProviderType(_))
    }
}

/// Errors from an [`AccessStore`](crate::AccessStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id.
    #[error("Access record not found: {0}")]
    NotFound(AccessId),

    /// Another record already uses this name.
    #[error("Access name already in use: '{0}'")]
    DuplicateName(String),

    /// The backing store could not be reached.
    #[error("Access store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for access operations.
pub type AccessResult<T> = Result<T, AccessError>;
