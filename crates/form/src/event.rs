//! Field change events

use keyward_eventbus::{ScopeToken, Scoped};

/// Published by a [`FieldForm`](crate::FieldForm) after an edit commits.
///
/// Carries no value: subscribers read the form they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    /// Scope of the editor that mounted the form.
    pub scope: ScopeToken,
    /// Schema name of the edited form.
    pub form: &'static str,
    /// Edited field key.
    pub field: String,
}

impl Scoped for FormEvent {
    fn scope(&self) -> &ScopeToken {
        &self.scope
    }
}
