//! The payload form contract
//!
//! A payload form owns the provider-specific `config` slice of one access
//! draft. The envelope controller reads it through [`PayloadForm::value`],
//! rewinds it through [`PayloadForm::reset`] and validates it through
//! [`PayloadForm::validate`]; widgets edit it through
//! [`PayloadForm::set_field`].

use std::sync::Arc;

use async_trait::async_trait;
use keyward_eventbus::{EventBus, ScopeToken};
use keyward_form::{FieldForm, FormError, FormEvent, FormOptions, FormSchema};
use keyward_validator::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::PayloadValue;
use crate::provider::ProviderType;

/// Operations every provider payload form supports.
#[async_trait]
pub trait PayloadForm: Send + Sync + std::fmt::Debug {
    /// Provider whose schema this form follows.
    fn provider(&self) -> ProviderType;

    /// Current values, valid or not. No side effects.
    fn value(&self) -> PayloadValue;

    /// Restores the last initial value, discarding interim edits.
    fn reset(&self);

    /// Replaces the initial value and re-seeds the fields from it.
    fn set_initial_value(&self, initial: Option<PayloadValue>);

    /// Validates every field against this provider's schema.
    ///
    /// Displayed values are not touched.
    async fn validate(&self) -> Result<PayloadValue, ValidationErrors>;

    /// Commits one widget edit and publishes it on the bus.
    fn set_field(&self, key: &str, value: Value) -> Result<(), FormError>;

    /// Replaces the host flags.
    fn set_options(&self, options: FormOptions);

    /// Unmounts the form; later edits are refused and never published.
    fn detach(&self);
}

/// Options a payload form is mounted with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadFormOptions {
    #[serde(flatten)]
    pub form: FormOptions,
    pub initial_value: Option<PayloadValue>,
}

/// Everything the registry needs to mount a payload form.
#[derive(Debug, Clone)]
pub struct PayloadMount {
    pub scope: ScopeToken,
    pub bus: EventBus<FormEvent>,
    pub options: PayloadFormOptions,
}

/// Payload form backed by a declarative [`FormSchema`].
///
/// Every provider uses this implementation; providers differ only in the
/// schema they are mounted with.
#[derive(Debug)]
pub struct SchemaPayloadForm {
    provider: ProviderType,
    form: FieldForm,
}

impl SchemaPayloadForm {
    /// Mounts `schema` for `provider`.
    #[must_use]
    pub fn mount(provider: ProviderType, schema: FormSchema, mount: PayloadMount) -> Self {
        let PayloadMount {
            scope,
            bus,
            options,
        } = mount;
        Self {
            provider,
            form: FieldForm::new(
                Arc::new(schema),
                scope,
                bus,
                options.form,
                options.initial_value,
            ),
        }
    }

    /// The underlying field form.
    #[must_use]
    pub fn fields(&self) -> &FieldForm {
        &self.form
    }
}

#[async_trait]
impl PayloadForm for SchemaPayloadForm {
    fn provider(&self) -> ProviderType {
        self.provider
    }

    fn value(&self) -> PayloadValue {
        self.form.value()
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn set_initial_value(&self, initial: Option<PayloadValue>) {
        self.form.set_initial_value(initial);
    }

    async fn validate(&self) -> Result<PayloadValue, ValidationErrors> {
        self.form.validate()
    }

    fn set_field(&self, key: &str, value: Value) -> Result<(), FormError> {
        self.form.set_field(key, value)
    }

    fn set_options(&self, options: FormOptions) {
        self.form.set_options(options);
    }

    fn detach(&self) {
        self.form.detach();
    }
}
