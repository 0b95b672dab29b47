//! Whole-document validation for certificate provisioning documents

use super::error::{messages, FieldPath, Violation};
use super::tenant::validate_tenant;
use crate::schema::TenantRecord;

/// Every violation in the document, in tenant order
pub fn collect_violations(records: &[TenantRecord]) -> Vec<Violation> {
    let root = FieldPath::root();
    let mut violations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        validate_tenant(record, &root.index(index), &mut violations);
    }
    violations
}

/// Ordered error messages for a document; empty means the document is valid
pub fn validate_document(records: &[TenantRecord]) -> Vec<String> {
    messages(&collect_violations(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CredentialBundle, SiteGroup};

    fn tenant(name: &str, groups: Vec<SiteGroup>) -> TenantRecord {
        TenantRecord {
            tenant: name.into(),
            env: "prod".into(),
            site_groups: groups,
        }
    }

    fn group(name: &str, sites: &[&str]) -> SiteGroup {
        SiteGroup {
            group_name: name.into(),
            sites: sites.iter().map(|s| s.to_string()).collect(),
            ..SiteGroup::default()
        }
    }

    #[test]
    fn test_well_formed_document_is_valid() {
        let mut wildcard = group("wild", &["eu.corp.example.com", "corp.example.com"]);
        wildcard.cert_mode = "*.corp.example.com".into();
        wildcard.cert_provider = "letsencrypt".into();
        wildcard.cert_type = "ec-384".into();
        wildcard.cert_provider_creds = Some(CredentialBundle {
            email: "ops@example.com".into(),
            kid: "kid".into(),
            hmac_key: "key".into(),
        });

        let records = vec![
            tenant("acme", vec![group("main", &["a.example.com"]), wildcard]),
            tenant("beta", vec![group("main", &["a.example.com"])]),
        ];
        assert!(validate_document(&records).is_empty());
    }

    #[test]
    fn test_empty_document_is_valid() {
        assert!(validate_document(&[]).is_empty());
    }

    #[test]
    fn test_unknown_provider_yields_one_error() {
        let mut g = group("main", &["a.example.com"]);
        g.cert_provider = "unknownca".into();
        let found = validate_document(&[tenant("acme", vec![g])]);

        assert_eq!(found.len(), 1);
        for provider in crate::rules::CERT_PROVIDERS {
            assert!(found[0].contains(provider));
        }
    }

    #[test]
    fn test_errors_keep_tenant_order_without_dedup() {
        let records = vec![
            tenant("", vec![group("main", &["a.example.com"])]),
            tenant("", vec![group("main", &["a.example.com"])]),
        ];
        let violations = collect_violations(&records);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message(), violations[1].message());
        assert_eq!(violations[0].location.to_string(), "[0].tenant");
        assert_eq!(violations[1].location.to_string(), "[1].tenant");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut g = group("", &["x", "x"]);
        g.cert_mode = "*.corp.example.com".into();
        let records = vec![tenant("acme", vec![g])];

        let first = validate_document(&records);
        assert!(!first.is_empty());
        assert_eq!(first, validate_document(&records));
    }
}
