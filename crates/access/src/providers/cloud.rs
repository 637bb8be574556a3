//! Cloud platforms authenticated with a key pair

use keyward_form::FormSchema;

use super::{key_id, secret};

fn key_pair(name: &'static str, id: &'static str, secret_key: &'static str) -> FormSchema {
    FormSchema::new(name).field(key_id(id)).field(secret(secret_key))
}

pub fn aliyun() -> FormSchema {
    key_pair("aliyun", "accessKeyId", "accessKeySecret")
}

pub fn aws() -> FormSchema {
    key_pair("aws", "accessKeyId", "secretAccessKey")
        .field(key_id("region"))
        .field(key_id("hostedZoneId").optional())
}

pub fn baiducloud() -> FormSchema {
    key_pair("baiducloud", "accessKeyId", "secretAccessKey")
}

pub fn byteplus() -> FormSchema {
    key_pair("byteplus", "accessKey", "secretKey")
}

pub fn dogecloud() -> FormSchema {
    key_pair("dogecloud", "accessKey", "secretKey")
}

pub fn huaweicloud() -> FormSchema {
    key_pair("huaweicloud", "accessKeyId", "secretAccessKey").field(key_id("region"))
}

pub fn qiniu() -> FormSchema {
    key_pair("qiniu", "accessKey", "secretKey")
}

pub fn tencentcloud() -> FormSchema {
    key_pair("tencentcloud", "secretId", "secretKey")
}

pub fn volcengine() -> FormSchema {
    key_pair("volcengine", "accessKeyId", "secretAccessKey")
}
