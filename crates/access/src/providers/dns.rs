//! DNS providers used to solve ACME challenges

use keyward_form::{FieldSpec, FormSchema};

use super::{MAX_CREDENTIAL_LEN, key_id, secret};

/// Accepted values of the `httpreq` mode; empty selects the default mode.
pub const ACME_HTTP_REQ_MODES: &[&str] = &["", "RAW"];

pub fn acmehttpreq() -> FormSchema {
    FormSchema::new("acmehttpreq")
        .field(FieldSpec::text("endpoint").required().url())
        .field(FieldSpec::text("mode").one_of(ACME_HTTP_REQ_MODES))
        .field(key_id("username").optional())
        .field(secret("password").optional())
}

pub fn cloudflare() -> FormSchema {
    FormSchema::new("cloudflare").field(secret("dnsApiToken"))
}

pub fn godaddy() -> FormSchema {
    FormSchema::new("godaddy")
        .field(key_id("apiKey"))
        .field(secret("apiSecret"))
}

pub fn namesilo() -> FormSchema {
    FormSchema::new("namesilo").field(secret("apiKey"))
}

pub fn powerdns() -> FormSchema {
    FormSchema::new("powerdns")
        .field(
            FieldSpec::text("apiUrl")
                .required()
                .url()
                .max_length(MAX_CREDENTIAL_LEN),
        )
        .field(secret("apiKey"))
}
