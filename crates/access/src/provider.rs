//! Provider types and the provider catalog
//!
//! The set of provider types is closed. Each tag selects the payload schema
//! that applies to a record's `config`, and carries catalog metadata used by
//! list and selector views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// What a provider's credentials can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderUsage {
    /// DNS-01 / HTTP-01 challenge solving while applying for a certificate.
    Apply,
    /// Uploading or installing an issued certificate.
    Deploy,
    /// Both.
    All,
}

impl ProviderUsage {
    /// Returns true if credentials of this usage serve `wanted`.
    #[must_use]
    pub fn covers(self, wanted: ProviderUsage) -> bool {
        self == ProviderUsage::All || wanted == ProviderUsage::All || self == wanted
    }
}

/// Catalog entry for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    /// The provider tag.
    pub provider: ProviderType,
    /// Display name.
    pub name: &'static str,
    /// Icon path served by the console.
    pub icon: &'static str,
    /// Intended usage.
    pub usage: ProviderUsage,
}

macro_rules! provider_types {
    ($( $(#[$doc:meta])* $variant:ident => $tag:literal, $name:literal, $usage:ident; )*) => {
        /// Tag selecting which payload schema a record's `config` follows.
        ///
        /// Serialized as its wire tag, e.g. `"aliyun"` or `"k8s"`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ProviderType {
            $( $(#[$doc])* #[serde(rename = $tag)] $variant, )*
        }

        impl ProviderType {
            /// Every provider type, in ASCII order of the tags.
            pub const ALL: &'static [ProviderType] = &[ $( ProviderType::$variant, )* ];

            /// Wire tag.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( ProviderType::$variant => $tag, )*
                }
            }

            /// Catalog entry.
            #[must_use]
            pub const fn info(self) -> ProviderInfo {
                match self {
                    $( ProviderType::$variant => ProviderInfo {
                        provider: ProviderType::$variant,
                        name: $name,
                        icon: concat!("/imgs/providers/", $tag, ".svg"),
                        usage: ProviderUsage::$usage,
                    }, )*
                }
            }
        }

        impl FromStr for ProviderType {
            type Err = AccessError;

            fn from_str(tag: &str) -> Result<Self, Self::Err> {
                match tag {
                    $( $tag => Ok(ProviderType::$variant), )*
                    other => Err(AccessError::UnknownProviderType(other.to_string())),
                }
            }
        }
    };
}

// NOTICE: keep entries in ASCII order of their tags.
provider_types! {
    /// ACME HTTP request (lego `httpreq`) endpoint.
    AcmeHttpReq => "acmehttpreq", "ACME HTTP Request", Apply;
    /// Alibaba Cloud.
    Aliyun => "aliyun", "Alibaba Cloud", All;
    /// Amazon Web Services (Route 53).
    Aws => "aws", "AWS", Apply;
    /// Baidu AI Cloud.
    BaiduCloud => "baiducloud", "Baidu AI Cloud", All;
    /// BytePlus.
    BytePlus => "byteplus", "BytePlus", Deploy;
    /// Cloudflare.
    Cloudflare => "cloudflare", "Cloudflare", Apply;
    /// DogeCloud.
    DogeCloud => "dogecloud", "DogeCloud", Deploy;
    /// GoDaddy.
    GoDaddy => "godaddy", "GoDaddy", Apply;
    /// Huawei Cloud.
    HuaweiCloud => "huaweicloud", "Huawei Cloud", All;
    /// Kubernetes cluster.
    Kubernetes => "k8s", "Kubernetes", Deploy;
    /// The console host itself.
    Local => "local", "Local", Deploy;
    /// NameSilo.
    NameSilo => "namesilo", "NameSilo", Apply;
    /// PowerDNS.
    PowerDns => "powerdns", "PowerDNS", Apply;
    /// Qiniu Cloud.
    Qiniu => "qiniu", "Qiniu Cloud", Deploy;
    /// Remote host over SSH.
    Ssh => "ssh", "SSH", Deploy;
    /// Tencent Cloud.
    TencentCloud => "tencentcloud", "Tencent Cloud", All;
    /// Volcengine.
    VolcEngine => "volcengine", "Volcengine", All;
    /// Generic webhook.
    Webhook => "webhook", "Webhook", Deploy;
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full catalog, in ASCII order.
pub fn catalog() -> impl Iterator<Item = ProviderInfo> {
    ProviderType::ALL.iter().map(|provider| provider.info())
}

/// Providers usable for `usage`.
pub fn catalog_for(usage: ProviderUsage) -> impl Iterator<Item = ProviderInfo> {
    catalog().filter(move |info| info.usage.covers(usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn eighteen_providers_in_ascii_order() {
        let tags: Vec<&str> = ProviderType::ALL.iter().map(|p| p.as_str()).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();

        assert_eq!(tags.len(), 18);
        assert_eq!(tags, sorted);
    }

    #[test]
    fn tags_round_trip_through_from_str() {
        for provider in ProviderType::ALL {
            assert_eq!(provider.as_str().parse::<ProviderType>().unwrap(), *provider);
        }
    }

    #[rstest]
    #[case("")]
    #[case("Aliyun")]
    #[case("kubernetes")]
    #[case("azure")]
    fn undeclared_tags_are_rejected(#[case] tag: &str) {
        let err = tag.parse::<ProviderType>().unwrap_err();
        assert!(matches!(err, AccessError::UnknownProviderType(t) if t == tag));
    }

    #[test]
    fn serde_uses_wire_tags() {
        assert_eq!(
            serde_json::to_string(&ProviderType::Kubernetes).unwrap(),
            r#""k8s""#
        );
        let parsed: ProviderType = serde_json::from_str(r#""tencentcloud""#).unwrap();
        assert_eq!(parsed, ProviderType::TencentCloud);
        assert!(serde_json::from_str::<ProviderType>(r#""azure""#).is_err());
    }

    #[test]
    fn info_carries_icon_path() {
        let info = ProviderType::Cloudflare.info();
        assert_eq!(info.icon, "/imgs/providers/cloudflare.svg");
        assert_eq!(info.usage, ProviderUsage::Apply);
    }

    #[test]
    fn catalog_filters_by_usage() {
        let deploy: Vec<ProviderType> = catalog_for(ProviderUsage::Deploy)
            .map(|info| info.provider)
            .collect();
        assert!(deploy.contains(&ProviderType::Ssh));
        assert!(deploy.contains(&ProviderType::Aliyun));
        assert!(!deploy.contains(&ProviderType::Cloudflare));

        assert_eq!(catalog_for(ProviderUsage::All).count(), 18);
    }
}
