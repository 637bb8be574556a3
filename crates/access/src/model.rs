//! Access records and their edit-time drafts

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::provider::{ProviderType, ProviderUsage};

/// Provider-specific configuration; its shape follows the record's provider.
pub type PayloadValue = serde_json::Value;

/// Unique identifier of a stored access record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessId(Uuid);

impl AccessId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccessId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccessId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AccessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccessId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A persisted access record.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    pub id: AccessId,
    pub name: String,
    #[serde(rename = "configType")]
    pub provider: ProviderType,
    /// Stamped from the provider type whenever the record is written.
    pub usage: ProviderUsage,
    pub config: PayloadValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccessRecord {
    /// Draft for editing this record in place.
    #[must_use]
    pub fn to_draft(&self) -> AccessDraft {
        AccessDraft {
            id: Some(self.id),
            name: Some(self.name.clone()),
            provider: Some(self.provider),
            config: Some(self.config.clone()),
        }
    }

    /// Draft for creating a new record from this one.
    ///
    /// The id is dropped and the name gets a `-copy` suffix.
    #[must_use]
    pub fn copy_draft(&self) -> AccessDraft {
        AccessDraft {
            id: None,
            name: Some(format!("{}-copy", self.name)),
            provider: Some(self.provider),
            config: Some(self.config.clone()),
        }
    }
}

impl fmt::Debug for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("usage", &self.usage)
            .field("config", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Edit-time shape of an access record; every field may still be missing.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "configType", skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PayloadValue>,
}

impl AccessDraft {
    /// Empty draft for the given provider.
    #[must_use]
    pub fn for_provider(provider: ProviderType) -> Self {
        Self {
            provider: Some(provider),
            ..Self::default()
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the config.
    #[must_use]
    pub fn with_config(mut self, config: PayloadValue) -> Self {
        self.config = Some(config);
        self
    }
}

impl fmt::Debug for AccessDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessDraft")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("config", &self.config.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Whether the editor creates a new record or edits a stored one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// New record; the provider type may be changed freely.
    #[default]
    #[serde(alias = "add")]
    Create,
    /// Stored record; the provider type is locked.
    Edit,
}

impl EditMode {
    /// Returns true if the provider type may be re-selected.
    #[must_use]
    pub fn allows_provider_change(self) -> bool {
        self == EditMode::Create
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record() -> AccessRecord {
        let now = Utc::now();
        AccessRecord {
            id: AccessId::new(),
            name: "prod-dns".to_string(),
            provider: ProviderType::Cloudflare,
            usage: ProviderUsage::Apply,
            config: json!({"dnsApiToken": "secret-token"}),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn copy_draft_drops_the_id() {
        let record = record();
        let copy = record.copy_draft();

        assert_eq!(copy.id, None);
        assert_eq!(copy.name.as_deref(), Some("prod-dns-copy"));
        assert_eq!(copy.provider, Some(ProviderType::Cloudflare));
        assert_eq!(copy.config, Some(record.config.clone()));
    }

    #[test]
    fn draft_uses_wire_names() {
        let draft = AccessDraft::for_provider(ProviderType::Kubernetes).with_name("cluster");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "cluster", "configType": "k8s"})
        );

        let parsed: AccessDraft =
            serde_json::from_value(json!({"configType": "ssh", "config": {"host": "h"}})).unwrap();
        assert_eq!(parsed.provider, Some(ProviderType::Ssh));
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let value = serde_json::to_value(record()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["configType"], json!("cloudflare"));
        assert_eq!(value["usage"], json!("apply"));
    }

    #[test]
    fn debug_redacts_config() {
        let rendered = format!("{:?}", record().to_draft());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn edit_mode_accepts_legacy_add() {
        let mode: EditMode = serde_json::from_str(r#""add""#).unwrap();
        assert_eq!(mode, EditMode::Create);
        assert!(!EditMode::Edit.allows_provider_change());
    }

    #[test]
    fn access_id_parses_its_display() {
        let id = AccessId::new();
        assert_eq!(id.to_string().parse::<AccessId>().unwrap(), id);
        assert!("not-a-uuid".parse::<AccessId>().is_err());
    }
}
