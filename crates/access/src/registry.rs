//! Provider type to payload form dispatch
//!
//! A static table, in ASCII order of the tags, maps every [`ProviderType`]
//! to the schema its payload form is mounted from. The table is never
//! mutated at runtime.

use std::sync::Arc;

use keyward_form::FormSchema;

use crate::error::AccessError;
use crate::payload::{PayloadForm, PayloadMount, SchemaPayloadForm};
use crate::provider::ProviderType;
use crate::providers;

type SchemaFn = fn() -> FormSchema;

const REGISTRY: [(ProviderType, SchemaFn); 18] = [
    (ProviderType::AcmeHttpReq, providers::acmehttpreq),
    (ProviderType::Aliyun, providers::aliyun),
    (ProviderType::Aws, providers::aws),
    (ProviderType::BaiduCloud, providers::baiducloud),
    (ProviderType::BytePlus, providers::byteplus),
    (ProviderType::Cloudflare, providers::cloudflare),
    (ProviderType::DogeCloud, providers::dogecloud),
    (ProviderType::GoDaddy, providers::godaddy),
    (ProviderType::HuaweiCloud, providers::huaweicloud),
    (ProviderType::Kubernetes, providers::k8s),
    (ProviderType::Local, providers::local),
    (ProviderType::NameSilo, providers::namesilo),
    (ProviderType::PowerDns, providers::powerdns),
    (ProviderType::Qiniu, providers::qiniu),
    (ProviderType::Ssh, providers::ssh),
    (ProviderType::TencentCloud, providers::tencentcloud),
    (ProviderType::VolcEngine, providers::volcengine),
    (ProviderType::Webhook, providers::webhook),
];

fn schema_fn(provider: ProviderType) -> Result<SchemaFn, AccessError> {
    REGISTRY
        .binary_search_by_key(&provider, |(registered, _)| *registered)
        .map(|index| REGISTRY[index].1)
        .map_err(|_| {
            tracing::error!(%provider, "no payload form registered for provider type");
            AccessError::UnknownProviderType(provider.to_string())
        })
}

/// The payload schema for `provider`.
pub fn schema_for(provider: ProviderType) -> Result<FormSchema, AccessError> {
    schema_fn(provider).map(|build| build())
}

/// Mounts the payload form for `provider`.
pub fn mount(
    provider: ProviderType,
    mount: PayloadMount,
) -> Result<Arc<dyn PayloadForm>, AccessError> {
    let schema = schema_for(provider)?;
    tracing::debug!(%provider, scope = %mount.scope, "mounting payload form");
    Ok(Arc::new(SchemaPayloadForm::mount(provider, schema, mount)))
}

/// Resolves a raw tag, e.g. one read from an untyped source.
pub fn lookup_tag(tag: &str) -> Result<ProviderType, AccessError> {
    tag.parse().inspect_err(|_| {
        tracing::error!(tag, "unknown provider type tag");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyward_eventbus::{EventBus, ScopeToken};
    use pretty_assertions::assert_eq;

    use crate::payload::PayloadFormOptions;

    #[test]
    fn table_follows_declaration_order() {
        let registered: Vec<ProviderType> = REGISTRY.iter().map(|(p, _)| *p).collect();
        assert_eq!(registered, ProviderType::ALL.to_vec());
    }

    #[test]
    fn schema_names_match_tags() {
        for provider in ProviderType::ALL {
            assert_eq!(schema_for(*provider).unwrap().name(), provider.as_str());
        }
    }

    #[test]
    fn mount_is_total() {
        let bus = EventBus::new();
        for provider in ProviderType::ALL {
            let form = mount(
                *provider,
                PayloadMount {
                    scope: ScopeToken::allocate(),
                    bus: bus.clone(),
                    options: PayloadFormOptions::default(),
                },
            )
            .unwrap();
            assert_eq!(form.provider(), *provider);
        }
    }

    #[test]
    fn unknown_tags_fail_loudly() {
        let err = lookup_tag("azuredns").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(lookup_tag("ssh").unwrap(), ProviderType::Ssh);
    }
}
