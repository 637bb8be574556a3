//! Deployment targets reached directly: hosts, clusters and hooks

use keyward_form::{FieldSpec, FormSchema};

use super::{MAX_CREDENTIAL_LEN, MAX_DOCUMENT_LEN, key_id};

pub const DEFAULT_SSH_PORT: i64 = 22;

pub fn k8s() -> FormSchema {
    FormSchema::new("k8s").field(FieldSpec::multiline("kubeConfig").max_length(MAX_DOCUMENT_LEN))
}

/// The console host needs no credentials.
pub fn local() -> FormSchema {
    FormSchema::new("local")
}

pub fn ssh() -> FormSchema {
    FormSchema::new("ssh")
        .field(key_id("host"))
        .field(
            FieldSpec::integer("port")
                .required()
                .range(1, 65_535)
                .default_value(DEFAULT_SSH_PORT),
        )
        .field(key_id("username"))
        .field(FieldSpec::secret("password").max_length(MAX_CREDENTIAL_LEN))
        .field(FieldSpec::multiline("key").max_length(MAX_DOCUMENT_LEN))
        .field(FieldSpec::secret("keyPassphrase").max_length(MAX_CREDENTIAL_LEN))
}

pub fn webhook() -> FormSchema {
    FormSchema::new("webhook").field(FieldSpec::text("url").required().url())
}
