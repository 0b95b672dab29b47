//! Certificate provisioning documents: a JSON array of tenants

use crate::decode::lenient::{LenientDecode, ObjectReader, ShapeIssues};
use crate::validation::error::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantRecord {
    pub tenant: String,
    pub env: String,
    pub site_groups: Vec<SiteGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteGroup {
    pub group_name: String,
    pub sites: Vec<String>,
    pub cert_mode: String,
    pub cert_provider: String,
    pub cert_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_provider_creds: Option<CredentialBundle>,
}

/// External account binding credentials for the certificate provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialBundle {
    pub email: String,
    pub kid: String,
    pub hmac_key: String,
}

impl CredentialBundle {
    /// All three parts present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.kid.is_empty() && !self.hmac_key.is_empty()
    }
}

impl LenientDecode for TenantRecord {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            tenant: object.field("tenant"),
            env: object.field("env"),
            site_groups: object.field("site_groups"),
        }
    }
}

impl LenientDecode for SiteGroup {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            group_name: object.field("group_name"),
            sites: object.field("sites"),
            cert_mode: object.field("cert_mode"),
            cert_provider: object.field("cert_provider"),
            cert_type: object.field("cert_type"),
            cert_provider_creds: object.field("cert_provider_creds"),
        }
    }
}

impl LenientDecode for CredentialBundle {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            email: object.field("email"),
            kid: object.field("kid"),
            hmac_key: object.field("hmac_key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_completeness() {
        let mut bundle = CredentialBundle {
            email: "ops@example.com".into(),
            kid: "kid-1".into(),
            hmac_key: "secret".into(),
        };
        assert!(bundle.is_complete());

        bundle.kid.clear();
        assert!(!bundle.is_complete());
        assert!(!CredentialBundle::default().is_complete());
    }

    #[test]
    fn test_strict_deserialize_matches_lenient_on_clean_input() {
        let value = json!({
            "tenant": "acme",
            "env": "prod",
            "site_groups": [{
                "group_name": "main",
                "sites": ["a.example.com"],
                "cert_provider_creds": {"email": "e@example.com", "kid": "k", "hmac_key": "h"}
            }]
        });

        let strict: TenantRecord = serde_json::from_value(value.clone()).unwrap();
        let mut issues = ShapeIssues::default();
        let lenient = TenantRecord::decode_lenient(&value, &FieldPath::root(), &mut issues);

        assert!(issues.is_empty());
        assert_eq!(strict, lenient);
        assert!(lenient.site_groups[0].cert_provider_creds.is_some());
    }

    #[test]
    fn test_mismatch_path_points_into_nested_group() {
        let value = json!({"tenant": "acme", "site_groups": [{"sites": "a.example.com"}]});
        let mut issues = ShapeIssues::default();
        let record = TenantRecord::decode_lenient(&value, &FieldPath::root().index(0), &mut issues);

        assert_eq!(record.site_groups.len(), 1);
        assert!(record.site_groups[0].sites.is_empty());
        let (_, path) = issues.into_first().unwrap();
        assert_eq!(path.to_string(), "[0].site_groups[0].sites");
    }
}
