//! Mount-time form options

use serde::{Deserialize, Serialize};

/// Host-controlled flags shared by the envelope and its payload form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// The host disabled the editor.
    pub disabled: bool,
    /// The host is loading or submitting.
    pub loading: bool,
}

impl FormOptions {
    /// An inert form rejects edits.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_flag_makes_the_form_inert() {
        assert!(!FormOptions::default().is_inert());
        assert!(FormOptions { disabled: true, loading: false }.is_inert());
        assert!(FormOptions { disabled: false, loading: true }.is_inert());
    }

    #[test]
    fn missing_flags_default_to_false() {
        let options: FormOptions = serde_json::from_str(r#"{"loading":true}"#).unwrap();
        assert_eq!(options, FormOptions { disabled: false, loading: true });
    }
}
