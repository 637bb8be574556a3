//! The envelope form controller
//!
//! [`AccessEditForm`] owns one edit session: the envelope fields (name and
//! provider type), the mounted payload form for the selected provider, and
//! the merged draft reported to the host.
//!
//! Payload edits reach the controller over the shared
//! [`EventBus`](keyward_eventbus::EventBus). Every controller allocates its
//! own [`ScopeToken`] at construction, mounts payload forms under it, and
//! ignores events carrying any other token. Envelope edits go through the
//! controller directly.
//!
//! Lock order is session state, then payload form state. The session lock
//! is never held while the host callback runs or while validation is
//! awaited.

use std::fmt;
use std::sync::{Arc, Weak};

use keyward_eventbus::{EventBus, ScopeToken, Scoped, Subscription};
use keyward_form::{FormError, FormEvent, FormOptions};
use parking_lot::Mutex;

use crate::aggregate::{self, ValidatedAccess};
use crate::envelope::Envelope;
use crate::error::AccessError;
use crate::model::{AccessDraft, EditMode, PayloadValue};
use crate::payload::{PayloadForm, PayloadFormOptions, PayloadMount};
use crate::provider::ProviderType;
use crate::registry;

/// Form name reported by envelope edit errors.
pub const ENVELOPE_FORM: &str = "access";

/// Host callback fired with the merged draft after every accepted change.
pub type ModelChangeHandler = Arc<dyn Fn(&AccessDraft) + Send + Sync>;

/// Mounts the payload form for a provider type.
pub(crate) type Mounter = Arc<
    dyn Fn(ProviderType, PayloadMount) -> Result<Arc<dyn PayloadForm>, AccessError> + Send + Sync,
>;

/// Construction parameters of an [`AccessEditForm`].
#[derive(Clone, Default)]
pub struct AccessEditFormProps {
    pub mode: EditMode,
    pub options: FormOptions,
    /// Seeds the session; `None` leaves the controller uninitialized.
    pub model: Option<AccessDraft>,
    pub on_model_change: Option<ModelChangeHandler>,
}

impl fmt::Debug for AccessEditFormProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessEditFormProps")
            .field("mode", &self.mode)
            .field("options", &self.options)
            .field("model", &self.model)
            .field("on_model_change", &self.on_model_change.is_some())
            .finish()
    }
}

/// Lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No model was set yet.
    Uninitialized,
    /// A session is open; `provider` is the selected type, if any.
    Ready { provider: Option<ProviderType> },
}

struct Session {
    ready: bool,
    initial: AccessDraft,
    name: Option<String>,
    provider: Option<ProviderType>,
    config: Option<PayloadValue>,
    payload: Option<Arc<dyn PayloadForm>>,
    /// Bumped on every payload mount, to detect orphaned validations.
    generation: u64,
    options: FormOptions,
}

impl Session {
    fn new(options: FormOptions) -> Self {
        Self {
            ready: false,
            initial: AccessDraft::default(),
            name: None,
            provider: None,
            config: None,
            payload: None,
            generation: 0,
            options,
        }
    }

    fn draft(&self) -> AccessDraft {
        AccessDraft {
            id: self.initial.id,
            name: self.name.clone(),
            provider: self.provider,
            config: self.config.clone(),
        }
    }

    fn unmount_payload(&mut self) {
        if let Some(payload) = self.payload.take() {
            payload.detach();
        }
    }
}

struct Shared {
    scope: ScopeToken,
    bus: EventBus<FormEvent>,
    mode: EditMode,
    on_model_change: Option<ModelChangeHandler>,
    mounter: Mounter,
    session: Mutex<Session>,
}

impl Shared {
    fn mount_payload(
        &self,
        provider: ProviderType,
        options: FormOptions,
        initial_value: Option<PayloadValue>,
    ) -> Result<Arc<dyn PayloadForm>, AccessError> {
        (self.mounter)(
            provider,
            PayloadMount {
                scope: self.scope.clone(),
                bus: self.bus.clone(),
                options: PayloadFormOptions {
                    form: options,
                    initial_value,
                },
            },
        )
    }

    fn on_payload_edit(&self, event: &FormEvent) {
        let draft = {
            let mut session = self.session.lock();
            let Some(payload) = session.payload.clone() else {
                return;
            };
            // a late event from a form that was already swapped out
            if payload.provider().as_str() != event.form {
                return;
            }
            session.config = Some(payload.value());
            session.draft()
        };
        tracing::trace!(scope = %self.scope, field = %event.field, "payload change folded");
        self.notify(&draft);
    }

    fn notify(&self, draft: &AccessDraft) {
        if let Some(handler) = &self.on_model_change {
            handler(draft);
        }
    }
}

/// Orchestrates the envelope fields and the provider payload form of one
/// access record.
///
/// Dropping the controller unmounts it: the bus subscription is released
/// and the payload form is detached.
pub struct AccessEditForm {
    shared: Arc<Shared>,
    _subscription: Subscription,
}

impl AccessEditForm {
    /// Mounts a controller on `bus`.
    ///
    /// When `props.model` is set the controller starts [`Ready`](ControllerState::Ready)
    /// and mounts the payload form for the model's provider type.
    pub fn new(
        bus: &EventBus<FormEvent>,
        props: AccessEditFormProps,
    ) -> Result<Self, AccessError> {
        Self::with_mounter(bus, props, Arc::new(registry::mount))
    }

    /// Like [`new`](Self::new), with payload forms mounted by `mounter`
    /// instead of the registry.
    pub(crate) fn with_mounter(
        bus: &EventBus<FormEvent>,
        props: AccessEditFormProps,
        mounter: Mounter,
    ) -> Result<Self, AccessError> {
        let scope = ScopeToken::allocate();
        let shared = Arc::new(Shared {
            scope: scope.clone(),
            bus: bus.clone(),
            mode: props.mode,
            on_model_change: props.on_model_change,
            mounter,
            session: Mutex::new(Session::new(props.options)),
        });

        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let subscription = bus.subscribe(move |event: &FormEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if event.is_in(&shared.scope) {
                shared.on_payload_edit(event);
            }
        });

        let form = Self {
            shared,
            _subscription: subscription,
        };
        if let Some(model) = props.model {
            form.set_model(model)?;
        }

        tracing::debug!(%scope, mode = ?props.mode, "access editor mounted");
        Ok(form)
    }

    /// (Re-)opens the session seeded from `model`.
    ///
    /// Any mounted payload form is detached first, discarding its edits.
    /// The host is not notified.
    pub fn set_model(&self, model: AccessDraft) -> Result<(), AccessError> {
        let mut session = self.shared.session.lock();
        session.unmount_payload();

        let options = session.options;
        let payload = model
            .provider
            .map(|provider| {
                self.shared
                    .mount_payload(provider, options, model.config.clone())
            })
            .transpose()?;

        session.config = match &payload {
            Some(payload) => Some(payload.value()),
            None => model.config.clone(),
        };
        session.name = model.name.clone();
        session.provider = model.provider;
        session.payload = payload;
        session.generation += 1;
        session.initial = model;
        session.ready = true;

        tracing::debug!(
            scope = %self.shared.scope,
            provider = ?session.provider,
            "access model set"
        );
        Ok(())
    }

    /// Selects a provider type and swaps the payload form.
    ///
    /// The new form is seeded with the model's original config only when
    /// `provider` is the type the model was loaded with; otherwise it starts
    /// from that provider's defaults. Returns `Ok(false)` when nothing
    /// changed: the same type was selected again, or the editor is in
    /// [`EditMode::Edit`] where the type is locked.
    pub fn select_provider_type(&self, provider: ProviderType) -> Result<bool, AccessError> {
        let draft = {
            let mut session = self.shared.session.lock();
            if !session.ready {
                return Err(AccessError::NotReady);
            }
            if !self.shared.mode.allows_provider_change() {
                tracing::debug!(
                    scope = %self.shared.scope,
                    requested = %provider,
                    "provider type is locked in edit mode"
                );
                return Ok(false);
            }
            if session.options.is_inert() {
                return Err(FormError::Disabled {
                    form: ENVELOPE_FORM,
                }
                .into());
            }
            if session.provider == Some(provider) {
                return Ok(false);
            }

            let seed = if session.initial.provider == Some(provider) {
                session.initial.config.clone()
            } else {
                None
            };

            session.unmount_payload();
            let payload = self.shared.mount_payload(provider, session.options, seed)?;
            session.config = Some(payload.value());
            session.provider = Some(provider);
            session.payload = Some(payload);
            session.generation += 1;
            session.draft()
        };

        tracing::debug!(scope = %self.shared.scope, %provider, "provider type selected");
        self.shared.notify(&draft);
        Ok(true)
    }

    /// Selects a provider type by its wire tag.
    pub fn select_provider_tag(&self, tag: &str) -> Result<bool, AccessError> {
        self.select_provider_type(registry::lookup_tag(tag)?)
    }

    /// Edits the record name.
    pub fn set_name(&self, name: impl Into<String>) -> Result<(), AccessError> {
        let draft = {
            let mut session = self.shared.session.lock();
            if !session.ready {
                return Err(AccessError::NotReady);
            }
            if session.options.is_inert() {
                return Err(FormError::Disabled {
                    form: ENVELOPE_FORM,
                }
                .into());
            }
            session.name = Some(name.into());
            session.draft()
        };
        self.shared.notify(&draft);
        Ok(())
    }

    /// The mounted payload form, for widgets to edit.
    pub fn payload_form(&self) -> Option<Arc<dyn PayloadForm>> {
        self.shared.session.lock().payload.clone()
    }

    /// Current merged values, valid or not.
    ///
    /// An uninitialized controller reports an empty draft.
    pub fn get_fields_value(&self) -> AccessDraft {
        let session = self.shared.session.lock();
        if session.ready {
            session.draft()
        } else {
            AccessDraft::default()
        }
    }

    /// Restores the envelope and the mounted payload form to their initial
    /// values. The selected provider type is kept and the host is not
    /// notified.
    pub fn reset_fields(&self) {
        let mut session = self.shared.session.lock();
        if !session.ready {
            return;
        }
        session.name = session.initial.name.clone();
        let config = match &session.payload {
            Some(payload) => {
                payload.reset();
                Some(payload.value())
            }
            None => session.initial.config.clone(),
        };
        session.config = config;
    }

    /// Validates both halves and returns the merged, validated record.
    ///
    /// Fails with [`AccessError::Superseded`] when the payload form was
    /// swapped while validation was pending.
    pub async fn validate_access(&self) -> Result<ValidatedAccess, AccessError> {
        let (id, envelope, payload, generation) = {
            let session = self.shared.session.lock();
            if !session.ready {
                return Err(AccessError::NotReady);
            }
            let envelope = Envelope {
                name: session.name.clone(),
                provider: session.provider,
            };
            (
                session.initial.id,
                envelope,
                session.payload.clone(),
                session.generation,
            )
        };

        let result = aggregate::validate_joint(id, envelope, payload).await;

        if self.shared.session.lock().generation != generation {
            tracing::debug!(scope = %self.shared.scope, "discarding orphaned validation");
            return Err(AccessError::Superseded);
        }
        result
    }

    /// [`validate_access`](Self::validate_access) as a draft.
    pub async fn validate_fields(&self) -> Result<AccessDraft, AccessError> {
        self.validate_access().await.map(AccessDraft::from)
    }

    /// Current host flags.
    pub fn options(&self) -> FormOptions {
        self.shared.session.lock().options
    }

    /// Replaces the host flags of the envelope and the payload form.
    pub fn set_options(&self, options: FormOptions) {
        let mut session = self.shared.session.lock();
        session.options = options;
        if let Some(payload) = &session.payload {
            payload.set_options(options);
        }
    }

    pub fn state(&self) -> ControllerState {
        let session = self.shared.session.lock();
        if session.ready {
            ControllerState::Ready {
                provider: session.provider,
            }
        } else {
            ControllerState::Uninitialized
        }
    }

    pub fn scope(&self) -> &ScopeToken {
        &self.shared.scope
    }

    pub fn mode(&self) -> EditMode {
        self.shared.mode
    }
}

impl Drop for AccessEditForm {
    fn drop(&mut self) {
        self.shared.session.lock().unmount_payload();
        tracing::debug!(scope = %self.shared.scope, "access editor unmounted");
    }
}

impl fmt::Debug for AccessEditForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessEditForm")
            .field("scope", &self.shared.scope)
            .field("mode", &self.shared.mode)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use keyward_validator::ValidationErrors;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tokio::sync::oneshot;

    fn create_form(bus: &EventBus<FormEvent>, model: Option<AccessDraft>) -> AccessEditForm {
        AccessEditForm::new(
            bus,
            AccessEditFormProps {
                model,
                ..AccessEditFormProps::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn starts_uninitialized_without_a_model() {
        let bus = EventBus::new();
        let form = create_form(&bus, None);

        assert_eq!(form.state(), ControllerState::Uninitialized);
        assert_eq!(form.get_fields_value(), AccessDraft::default());
        assert!(matches!(
            form.select_provider_type(ProviderType::Aws),
            Err(AccessError::NotReady)
        ));
        assert!(matches!(form.set_name("x"), Err(AccessError::NotReady)));
    }

    #[test]
    fn empty_model_is_ready_without_a_provider() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::default()));

        assert_eq!(form.state(), ControllerState::Ready { provider: None });
        assert!(form.payload_form().is_none());
    }

    #[test]
    fn set_model_mounts_and_replaces_the_payload_form() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::for_provider(ProviderType::Ssh)));
        let first = form.payload_form().unwrap();

        form.set_model(AccessDraft::for_provider(ProviderType::Webhook))
            .unwrap();
        let second = form.payload_form().unwrap();

        assert_eq!(second.provider(), ProviderType::Webhook);
        assert!(first.set_field("host", json!("h")).is_err());
        assert_eq!(form.get_fields_value().config, Some(json!({"url": ""})));
    }

    #[test]
    fn payload_edits_fold_into_the_snapshot() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::for_provider(ProviderType::NameSilo)));

        form.payload_form()
            .unwrap()
            .set_field("apiKey", json!("k-1"))
            .unwrap();

        assert_eq!(form.get_fields_value().config, Some(json!({"apiKey": "k-1"})));
    }

    #[test]
    fn inert_controller_refuses_envelope_edits() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::default()));
        form.set_options(FormOptions {
            disabled: true,
            loading: false,
        });

        assert!(matches!(
            form.set_name("x"),
            Err(AccessError::Form(FormError::Disabled { form: ENVELOPE_FORM }))
        ));
        assert!(matches!(
            form.select_provider_type(ProviderType::Local),
            Err(AccessError::Form(_))
        ));
    }

    #[test]
    fn options_reach_the_payload_form() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::for_provider(ProviderType::NameSilo)));
        form.set_options(FormOptions {
            disabled: false,
            loading: true,
        });

        let err = form
            .payload_form()
            .unwrap()
            .set_field("apiKey", json!("k"))
            .unwrap_err();
        assert!(matches!(err, FormError::Disabled { form: "namesilo" }));
    }

    #[test]
    fn drop_detaches_the_subscription_and_payload() {
        let bus = EventBus::new();
        let form = create_form(&bus, Some(AccessDraft::for_provider(ProviderType::Cloudflare)));
        let payload = form.payload_form().unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        drop(form);

        assert_eq!(bus.subscriber_count(), 0);
        assert!(matches!(
            payload.set_field("dnsApiToken", json!("t")),
            Err(FormError::Detached { .. })
        ));
    }

    #[test]
    fn host_callback_sees_every_accepted_change() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let form = AccessEditForm::new(
            &bus,
            AccessEditFormProps {
                model: Some(AccessDraft::default()),
                on_model_change: Some({
                    let seen = Arc::clone(&seen);
                    let handler: ModelChangeHandler =
                        Arc::new(move |draft: &AccessDraft| seen.lock().push(draft.clone()));
                    handler
                }),
                ..AccessEditFormProps::default()
            },
        )
        .unwrap();

        form.set_name("dns").unwrap();
        form.select_provider_type(ProviderType::Cloudflare).unwrap();
        form.payload_form()
            .unwrap()
            .set_field("dnsApiToken", json!("t"))
            .unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].name.as_deref(), Some("dns"));
        assert_eq!(seen[1].provider, Some(ProviderType::Cloudflare));
        assert_eq!(seen[2].config, Some(json!({"dnsApiToken": "t"})));
    }

    #[tokio::test]
    async fn validate_fields_returns_the_merged_draft() {
        let bus = EventBus::new();
        let form = create_form(
            &bus,
            Some(
                AccessDraft::for_provider(ProviderType::Cloudflare)
                    .with_name(" edge ")
                    .with_config(json!({"dnsApiToken": "t"})),
            ),
        );

        let draft = form.validate_fields().await.unwrap();
        assert_eq!(draft.name.as_deref(), Some("edge"));
        assert_eq!(draft.config, Some(json!({"dnsApiToken": "t"})));
    }

    /// Payload form whose first validation waits for a release signal.
    #[derive(Debug)]
    struct Gated {
        inner: Arc<dyn PayloadForm>,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl PayloadForm for Gated {
        fn provider(&self) -> ProviderType {
            self.inner.provider()
        }

        fn value(&self) -> PayloadValue {
            self.inner.value()
        }

        fn reset(&self) {
            self.inner.reset();
        }

        fn set_initial_value(&self, initial: Option<PayloadValue>) {
            self.inner.set_initial_value(initial);
        }

        async fn validate(&self) -> Result<PayloadValue, ValidationErrors> {
            let gate = self.gate.lock().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.inner.validate().await
        }

        fn set_field(&self, key: &str, value: Value) -> Result<(), FormError> {
            self.inner.set_field(key, value)
        }

        fn set_options(&self, options: FormOptions) {
            self.inner.set_options(options);
        }

        fn detach(&self) {
            self.inner.detach();
        }
    }

    /// Controller whose first mounted payload form is gated.
    fn gated_form(model: AccessDraft) -> (AccessEditForm, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        let gate = Arc::new(Mutex::new(Some(gate)));
        let mounter: Mounter = Arc::new(move |provider: ProviderType, mount: PayloadMount| {
            let inner = registry::mount(provider, mount)?;
            let form: Arc<dyn PayloadForm> = Arc::new(Gated {
                inner,
                gate: Mutex::new(gate.lock().take()),
            });
            Ok(form)
        });
        let form = AccessEditForm::with_mounter(
            &EventBus::new(),
            AccessEditFormProps {
                model: Some(model),
                ..AccessEditFormProps::default()
            },
            mounter,
        )
        .unwrap();
        (form, release)
    }

    fn valid_cloudflare() -> AccessDraft {
        AccessDraft::for_provider(ProviderType::Cloudflare)
            .with_name("edge")
            .with_config(json!({"dnsApiToken": "t"}))
    }

    #[tokio::test]
    async fn swapping_the_payload_supersedes_a_pending_validation() {
        let (form, release) = gated_form(valid_cloudflare());

        let validation = form.validate_fields();
        futures::pin_mut!(validation);
        assert!(futures::poll!(validation.as_mut()).is_pending());

        assert!(form.select_provider_type(ProviderType::Aws).unwrap());
        release.send(()).unwrap();

        assert!(matches!(validation.await, Err(AccessError::Superseded)));
        // the next validation runs against the new form
        let err = form.validate_fields().await.unwrap_err();
        assert!(err.validation_errors().unwrap().has_field("config.accessKeyId"));
    }

    #[tokio::test]
    async fn pending_validation_settles_when_nothing_changed() {
        let (form, release) = gated_form(valid_cloudflare());

        let validation = form.validate_fields();
        futures::pin_mut!(validation);
        assert!(futures::poll!(validation.as_mut()).is_pending());

        // edits do not bump the mount generation
        form.set_name("edge-2").unwrap();
        release.send(()).unwrap();

        let draft = validation.await.unwrap();
        assert_eq!(draft.name.as_deref(), Some("edge"));
    }
}
