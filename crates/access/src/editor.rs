//! The edit modal: one controller wired to a store

use std::sync::Arc;

use keyward_eventbus::EventBus;
use keyward_form::{FormEvent, FormOptions};

use crate::controller::{AccessEditForm, AccessEditFormProps, ModelChangeHandler};
use crate::error::AccessError;
use crate::model::{AccessDraft, AccessRecord, EditMode};
use crate::store::AccessStore;

/// Host flow around an [`AccessEditForm`]: open with a draft, let widgets
/// edit it, then [`submit`](Self::submit) it to an [`AccessStore`].
pub struct AccessEditor {
    form: AccessEditForm,
    store: Arc<dyn AccessStore>,
}

impl AccessEditor {
    /// Opens an editor in `mode` seeded from `model`.
    pub fn open(
        bus: &EventBus<FormEvent>,
        store: Arc<dyn AccessStore>,
        mode: EditMode,
        model: AccessDraft,
        on_model_change: Option<ModelChangeHandler>,
    ) -> Result<Self, AccessError> {
        let form = AccessEditForm::new(
            bus,
            AccessEditFormProps {
                mode,
                options: FormOptions::default(),
                model: Some(model),
                on_model_change,
            },
        )?;
        Ok(Self { form, store })
    }

    /// Opens an empty create dialog.
    pub fn create(
        bus: &EventBus<FormEvent>,
        store: Arc<dyn AccessStore>,
    ) -> Result<Self, AccessError> {
        Self::open(bus, store, EditMode::Create, AccessDraft::default(), None)
    }

    /// Opens `record` for editing; its provider type is locked.
    pub fn edit(
        bus: &EventBus<FormEvent>,
        store: Arc<dyn AccessStore>,
        record: &AccessRecord,
    ) -> Result<Self, AccessError> {
        Self::open(bus, store, EditMode::Edit, record.to_draft(), None)
    }

    /// Opens a create dialog prefilled from `record`.
    pub fn copy(
        bus: &EventBus<FormEvent>,
        store: Arc<dyn AccessStore>,
        record: &AccessRecord,
    ) -> Result<Self, AccessError> {
        Self::open(bus, store, EditMode::Create, record.copy_draft(), None)
    }

    /// The wrapped controller.
    pub fn form(&self) -> &AccessEditForm {
        &self.form
    }

    /// Validates the draft and persists it.
    ///
    /// The form is marked loading while the store call is in flight.
    /// Validation failures are returned unchanged; nothing is stored.
    pub async fn submit(&self) -> Result<AccessRecord, AccessError> {
        let access = self.form.validate_access().await?;
        let id = match self.form.mode() {
            EditMode::Create => None,
            EditMode::Edit => Some(access.id.ok_or(AccessError::MissingId)?),
        };

        let loading = LoadingGuard::enter(&self.form);
        let result = match id {
            None => self.store.create(access).await,
            Some(id) => self.store.update(id, access).await,
        };
        drop(loading);

        let record = result.inspect_err(|error| {
            tracing::warn!(scope = %self.form.scope(), %error, "saving access record failed");
        })?;
        tracing::info!(id = %record.id, provider = %record.provider, "access record saved");
        Ok(record)
    }
}

/// Marks a form loading; the previous flags come back on drop, including
/// when a pending submit is cancelled.
struct LoadingGuard<'a> {
    form: &'a AccessEditForm,
    restore: FormOptions,
}

impl<'a> LoadingGuard<'a> {
    fn enter(form: &'a AccessEditForm) -> Self {
        let restore = form.options();
        form.set_options(FormOptions {
            loading: true,
            ..restore
        });
        Self { form, restore }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.form.set_options(self.restore);
    }
}

impl std::fmt::Debug for AccessEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessEditor")
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}
