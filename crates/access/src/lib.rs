//! # keyward-access
//!
//! Edit-time orchestration of access credentials.
//!
//! An access record has two halves. The *envelope* (name and provider type)
//! is the same for every record; the *payload* (`config`) follows one of 18
//! provider schemas, picked by the provider type. [`AccessEditForm`] keeps
//! the two in step:
//!
//! - selecting a provider type swaps the mounted [`PayloadForm`], looked up
//!   in the static [`registry`];
//! - payload edits arrive over a shared
//!   [`EventBus`](keyward_eventbus::EventBus), filtered by the controller's
//!   own [`ScopeToken`](keyward_eventbus::ScopeToken), and are folded into
//!   the merged draft reported to the host;
//! - validation runs both halves concurrently and reports every failing
//!   field at once, see [`aggregate`].
//!
//! [`AccessEditor`] wires a controller to an [`AccessStore`] for the
//! create, edit and copy flows.
//!
//! ```rust,ignore
//! use keyward_access::prelude::*;
//!
//! let bus = EventBus::new();
//! let form = AccessEditForm::new(&bus, AccessEditFormProps {
//!     model: Some(AccessDraft::default()),
//!     ..Default::default()
//! })?;
//! form.set_name("edge-dns")?;
//! form.select_provider_type(ProviderType::Cloudflare)?;
//! form.payload_form().unwrap().set_field("dnsApiToken", "token".into())?;
//!
//! let draft = form.validate_fields().await?;
//! ```

pub mod aggregate;
mod controller;
mod editor;
mod envelope;
mod error;
mod model;
mod payload;
mod provider;
pub mod providers;
pub mod registry;
mod store;

pub use aggregate::{ValidatedAccess, validate_joint};
pub use controller::{
    AccessEditForm, AccessEditFormProps, ControllerState, ENVELOPE_FORM, ModelChangeHandler,
};
pub use editor::AccessEditor;
pub use envelope::{Envelope, MAX_NAME_LEN, ValidEnvelope};
pub use error::{AccessError, AccessResult, StoreError};
pub use model::{AccessDraft, AccessId, AccessRecord, EditMode, PayloadValue};
pub use payload::{PayloadForm, PayloadFormOptions, PayloadMount, SchemaPayloadForm};
pub use provider::{ProviderInfo, ProviderType, ProviderUsage, catalog, catalog_for};
pub use store::{AccessStore, MemoryAccessStore};

/// Common imports for hosts embedding the editor.
pub mod prelude {
    pub use crate::{
        AccessDraft, AccessEditForm, AccessEditFormProps, AccessEditor, AccessError, AccessRecord,
        AccessStore, ControllerState, EditMode, MemoryAccessStore, PayloadForm, ProviderType,
    };
    pub use keyward_eventbus::EventBus;
    pub use keyward_form::{FormEvent, FormOptions};
}
