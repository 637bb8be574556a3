//! Payload schemas, one per provider
//!
//! Credentials are capped at 64 characters; PEM keys and kubeconfigs at
//! 20 KiB.

mod cloud;
mod dns;
mod host;

pub use cloud::{
    aliyun, aws, baiducloud, byteplus, dogecloud, huaweicloud, qiniu, tencentcloud, volcengine,
};
pub use dns::{ACME_HTTP_REQ_MODES, acmehttpreq, cloudflare, godaddy, namesilo, powerdns};
pub use host::{DEFAULT_SSH_PORT, k8s, local, ssh, webhook};

use keyward_form::FieldSpec;

pub(crate) const MAX_CREDENTIAL_LEN: usize = 64;
pub(crate) const MAX_DOCUMENT_LEN: usize = 20_480;

/// Required, trimmed, non-secret credential field.
fn key_id(key: &'static str) -> FieldSpec {
    FieldSpec::text(key).required().max_length(MAX_CREDENTIAL_LEN)
}

/// Required secret credential field.
fn secret(key: &'static str) -> FieldSpec {
    FieldSpec::secret(key).required().max_length(MAX_CREDENTIAL_LEN)
}
