//! Joint validation of the envelope and the payload form
//!
//! Both halves always run to completion, so a failure carries every field
//! error at once: envelope errors under their own keys, payload errors
//! under `config.<field>`.

use std::sync::Arc;

use futures::future;
use keyward_validator::{ValidationError, ValidationErrors};
use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::AccessError;
use crate::model::{AccessDraft, AccessId, PayloadValue};
use crate::payload::PayloadForm;
use crate::provider::ProviderType;

/// Field prefix under which payload errors are reported.
pub const CONFIG_FIELD: &str = "config";

/// A draft whose envelope and payload both passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccessId>,
    pub name: String,
    #[serde(rename = "configType")]
    pub provider: ProviderType,
    pub config: PayloadValue,
}

impl From<ValidatedAccess> for AccessDraft {
    fn from(valid: ValidatedAccess) -> Self {
        Self {
            id: valid.id,
            name: Some(valid.name),
            provider: Some(valid.provider),
            config: Some(valid.config),
        }
    }
}

/// Validates `envelope` and `payload` concurrently and merges the outcome.
///
/// With no payload form mounted the payload half fails with a required
/// `config` error, so a record can never validate without its config.
pub async fn validate_joint(
    id: Option<AccessId>,
    envelope: Envelope,
    payload: Option<Arc<dyn PayloadForm>>,
) -> Result<ValidatedAccess, AccessError> {
    let envelope_half = async { envelope.validate() };
    let payload_half = async {
        match &payload {
            Some(form) => form.validate().await,
            // re-homed under `config` below
            None => Err(ValidationErrors::from(ValidationError::required(""))),
        }
    };

    let (envelope_result, payload_result) = future::join(envelope_half, payload_half).await;

    match (envelope_result, payload_result) {
        (Ok(envelope), Ok(config)) => Ok(ValidatedAccess {
            id,
            name: envelope.name,
            provider: envelope.provider,
            config,
        }),
        (envelope_result, payload_result) => {
            let mut errors = ValidationErrors::new();
            if let Err(envelope_errors) = envelope_result {
                errors.merge(envelope_errors);
            }
            if let Err(payload_errors) = payload_result {
                errors.merge(payload_errors.prefixed(CONFIG_FIELD));
            }
            tracing::debug!(errors = errors.len(), "access validation failed");
            Err(AccessError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use async_trait::async_trait;
    use keyward_eventbus::{EventBus, ScopeToken};
    use keyward_form::{FormError, FormOptions};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use crate::payload::{PayloadFormOptions, PayloadMount};
    use crate::registry;

    fn mounted(provider: ProviderType, initial: Option<PayloadValue>) -> Arc<dyn PayloadForm> {
        registry::mount(
            provider,
            PayloadMount {
                scope: ScopeToken::allocate(),
                bus: EventBus::new(),
                options: PayloadFormOptions {
                    initial_value: initial,
                    ..PayloadFormOptions::default()
                },
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn success_merges_both_halves() {
        let envelope = Envelope {
            name: Some(" edge ".to_string()),
            provider: Some(ProviderType::Cloudflare),
        };
        let payload = mounted(ProviderType::Cloudflare, Some(json!({"dnsApiToken": "t"})));

        let valid = validate_joint(None, envelope, Some(payload)).await.unwrap();
        assert_eq!(
            valid,
            ValidatedAccess {
                id: None,
                name: "edge".to_string(),
                provider: ProviderType::Cloudflare,
                config: json!({"dnsApiToken": "t"}),
            }
        );
    }

    #[tokio::test]
    async fn failure_unions_both_halves() {
        let envelope = Envelope {
            name: Some(String::new()),
            provider: Some(ProviderType::Cloudflare),
        };
        let payload = mounted(ProviderType::Cloudflare, None);

        let err = validate_joint(None, envelope, Some(payload)).await.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.fields(), vec!["name", "config.dnsApiToken"]);
    }

    #[tokio::test]
    async fn missing_payload_is_a_config_error() {
        let envelope = Envelope {
            name: Some("n".to_string()),
            provider: None,
        };
        let err = validate_joint(None, envelope, None).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().fields(),
            vec!["configType", "config"]
        );
    }

    /// Payload form that only answers after a delay.
    #[derive(Debug)]
    struct Slow(Arc<dyn PayloadForm>);

    #[async_trait]
    impl PayloadForm for Slow {
        fn provider(&self) -> ProviderType {
            self.0.provider()
        }

        fn value(&self) -> PayloadValue {
            self.0.value()
        }

        fn reset(&self) {
            self.0.reset();
        }

        fn set_initial_value(&self, initial: Option<PayloadValue>) {
            self.0.set_initial_value(initial);
        }

        async fn validate(&self) -> Result<PayloadValue, ValidationErrors> {
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.0.validate().await
        }

        fn set_field(&self, key: &str, value: Value) -> Result<(), FormError> {
            self.0.set_field(key, value)
        }

        fn set_options(&self, options: FormOptions) {
            self.0.set_options(options);
        }

        fn detach(&self) {
            self.0.detach();
        }
    }

    #[tokio::test]
    async fn early_envelope_failure_waits_for_the_payload() {
        let envelope = Envelope {
            name: Some("   ".to_string()),
            provider: Some(ProviderType::Cloudflare),
        };
        let payload: Arc<dyn PayloadForm> =
            Arc::new(Slow(mounted(ProviderType::Cloudflare, None)));

        let err = validate_joint(None, envelope, Some(payload)).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().fields(),
            vec!["name", "config.dnsApiToken"]
        );
    }

    #[tokio::test]
    async fn slow_payload_success_still_merges() {
        let envelope = Envelope {
            name: Some("edge".to_string()),
            provider: Some(ProviderType::Cloudflare),
        };
        let payload: Arc<dyn PayloadForm> = Arc::new(Slow(mounted(
            ProviderType::Cloudflare,
            Some(json!({"dnsApiToken": "t"})),
        )));

        let valid = validate_joint(None, envelope, Some(payload)).await.unwrap();
        assert_eq!(valid.config, json!({"dnsApiToken": "t"}));
    }
}
