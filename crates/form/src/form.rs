//! Mounted form instances

use std::fmt;
use std::sync::Arc;

use keyward_eventbus::{EventBus, ScopeToken};
use keyward_validator::ValidationErrors;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{FormError, FormEvent, FormOptions, FormSchema, FormValues};

struct FormState {
    values: FormValues,
    initial: FormValues,
    options: FormOptions,
    attached: bool,
}

/// One mounted instance of a [`FormSchema`].
///
/// All methods take `&self`; the form is shared between the editor that
/// mounted it and the widgets editing it. The internal lock is never held
/// while an event is published.
pub struct FieldForm {
    schema: Arc<FormSchema>,
    scope: ScopeToken,
    bus: EventBus<FormEvent>,
    state: Mutex<FormState>,
}

impl FieldForm {
    /// Mounts `schema` under `scope`.
    ///
    /// `initial` seeds the fields; `None` (or a non-object) seeds the
    /// schema defaults.
    #[must_use]
    pub fn new(
        schema: Arc<FormSchema>,
        scope: ScopeToken,
        bus: EventBus<FormEvent>,
        options: FormOptions,
        initial: Option<Value>,
    ) -> Self {
        let initial = seed(&schema, initial);
        tracing::trace!(form = schema.name(), %scope, "form mounted");
        Self {
            state: Mutex::new(FormState {
                values: initial.clone(),
                initial,
                options,
                attached: true,
            }),
            schema,
            scope,
            bus,
        }
    }

    /// The schema this form was mounted from.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The owning editor's scope.
    #[must_use]
    pub fn scope(&self) -> &ScopeToken {
        &self.scope
    }

    /// Current values, valid or not.
    #[must_use]
    pub fn value(&self) -> Value {
        Value::Object(self.state.lock().values.clone())
    }

    /// Current value of one field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<Value> {
        self.state.lock().values.get(key).cloned()
    }

    /// Commits an edit and publishes a [`FormEvent`].
    pub fn set_field(&self, key: &str, value: impl Into<Value>) -> Result<(), FormError> {
        let form = self.schema.name();
        {
            let mut state = self.state.lock();
            if !state.attached {
                return Err(FormError::Detached { form });
            }
            if state.options.is_inert() {
                return Err(FormError::Disabled { form });
            }
            if self.schema.spec(key).is_none() {
                return Err(FormError::UnknownField {
                    form,
                    field: key.to_string(),
                });
            }
            state.values.insert(key.to_string(), value.into());
        }

        tracing::trace!(form, field = key, scope = %self.scope, "field edited");
        self.bus.emit(&FormEvent {
            scope: self.scope.clone(),
            form,
            field: key.to_string(),
        });
        Ok(())
    }

    /// Replaces the initial values and re-seeds the fields from them.
    pub fn set_initial_value(&self, initial: Option<Value>) {
        let initial = seed(&self.schema, initial);
        let mut state = self.state.lock();
        state.values = initial.clone();
        state.initial = initial;
    }

    /// Restores the last initial values, discarding interim edits.
    ///
    /// Publishes nothing.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.values = state.initial.clone();
    }

    /// Validates the current values.
    ///
    /// Reports only; the displayed values are left untouched.
    pub fn validate(&self) -> Result<Value, ValidationErrors> {
        let values = self.state.lock().values.clone();
        self.schema.validate(&values).map(Value::Object)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> FormOptions {
        self.state.lock().options
    }

    /// Replaces the options.
    pub fn set_options(&self, options: FormOptions) {
        self.state.lock().options = options;
    }

    /// Unmounts the form: later edits are refused and nothing is published.
    pub fn detach(&self) {
        let mut state = self.state.lock();
        if state.attached {
            state.attached = false;
            tracing::trace!(form = self.schema.name(), scope = %self.scope, "form detached");
        }
    }

    /// Returns false once [`detach`](Self::detach) ran.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.lock().attached
    }
}

fn seed(schema: &FormSchema, initial: Option<Value>) -> FormValues {
    match initial {
        Some(Value::Object(values)) => values,
        _ => schema.defaults(),
    }
}

impl fmt::Debug for FieldForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // values may hold secrets
        f.debug_struct("FieldForm")
            .field("schema", &self.schema.name())
            .field("scope", &self.scope)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
