//! Site-group validation
//!
//! Checks run in a fixed order and every failure is recorded.

use super::error::{FieldPath, Violation, ViolationKind};
use super::fields::{check_cert_mode, check_cert_provider, check_cert_type, check_credentials, check_site};
use crate::rules::CertMode;
use crate::schema::SiteGroup;
use std::collections::HashSet;

/// Validate one group. `seen_sites` is shared by all groups of a tenant so
/// that duplicates are caught across groups.
pub fn validate_site_group<'g>(
    group: &'g SiteGroup,
    path: &FieldPath,
    seen_sites: &mut HashSet<&'g str>,
    violations: &mut Vec<Violation>,
) {
    let mut push = |kind: ViolationKind, location: FieldPath| {
        violations.push(Violation::new(kind, location));
    };

    if group.group_name.is_empty() {
        push(
            ViolationKind::MissingGroupField { field: "group_name" },
            path.field("group_name"),
        );
    }

    let sites_path = path.field("sites");
    if group.sites.is_empty() {
        push(ViolationKind::MissingField { field: "sites" }, sites_path.clone());
    } else {
        for (index, site) in group.sites.iter().enumerate() {
            if !seen_sites.insert(site.as_str()) {
                push(
                    ViolationKind::DuplicateSite { site: site.clone() },
                    sites_path.index(index),
                );
            }
        }
    }

    let mode = CertMode::resolve(&group.cert_mode);

    if let Err(kind) = check_cert_mode(&group.cert_mode, &mode) {
        push(kind, path.field("cert_mode"));
    }
    if let Err(kind) = check_cert_provider(&group.cert_provider) {
        push(kind, path.field("cert_provider"));
    }
    if let Err(kind) = check_cert_type(&group.cert_type) {
        push(kind, path.field("cert_type"));
    }
    if let Err(kind) = check_credentials(group.cert_provider_creds.as_ref()) {
        push(kind, path.field("cert_provider_creds"));
    }

    for (index, site) in group.sites.iter().enumerate() {
        if let Err(kind) = check_site(site, &group.cert_mode, &mode) {
            push(kind, sites_path.index(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CredentialBundle;
    use crate::validation::error::messages;

    fn group(name: &str, sites: &[&str]) -> SiteGroup {
        SiteGroup {
            group_name: name.into(),
            sites: sites.iter().map(|s| s.to_string()).collect(),
            ..SiteGroup::default()
        }
    }

    fn run(groups: &[SiteGroup]) -> Vec<Violation> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        for (index, g) in groups.iter().enumerate() {
            validate_site_group(
                g,
                &FieldPath::root().index(0).field("site_groups").index(index),
                &mut seen,
                &mut violations,
            );
        }
        violations
    }

    #[test]
    fn test_valid_group() {
        assert!(run(&[group("main", &["a.example.com", "b.example.com"])]).is_empty());
    }

    #[test]
    fn test_empty_group_continues_with_remaining_checks() {
        let mut g = group("", &[]);
        g.cert_provider = "unknownca".into();

        let found = messages(&run(&[g]));
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], "SG field 'group_name' not found or empty");
        assert_eq!(found[1], "Field 'sites' not found or empty");
        assert!(found[2].starts_with("Incorrect SG field 'cert_provider' value: 'unknownca'"));
    }

    #[test]
    fn test_duplicate_across_groups_reported_once() {
        let violations = run(&[
            group("one", &["a.example.com"]),
            group("two", &["a.example.com"]),
        ]);
        assert_eq!(
            messages(&violations),
            vec!["Duplicate found for site 'a.example.com'".to_string()]
        );
        assert_eq!(
            violations[0].location.to_string(),
            "[0].site_groups[1].sites[0]"
        );
    }

    #[test]
    fn test_duplicate_within_group() {
        let found = messages(&run(&[group("one", &["a.example.com", "a.example.com"])]));
        assert_eq!(found, vec!["Duplicate found for site 'a.example.com'".to_string()]);
    }

    #[test]
    fn test_check_order() {
        let mut g = group("main", &["localhost"]);
        g.cert_mode = "bogus".into();
        g.cert_provider = "nobody".into();
        g.cert_type = "1024".into();
        g.cert_provider_creds = Some(CredentialBundle {
            email: "ops@example.com".into(),
            ..CredentialBundle::default()
        });

        let found = messages(&run(&[g]));
        assert_eq!(found.len(), 5);
        assert!(found[0].contains("'cert_mode'"));
        assert!(found[1].contains("'cert_provider'"));
        assert!(found[2].contains("'cert_type'"));
        assert_eq!(found[3], "Field 'cert_provider_creds' has incorrect format");
        assert!(found[4].starts_with("Incorrect site field value: 'localhost'"));
        assert!(found[4].ends_with("and cert_mode 'bogus'"));
    }

    #[test]
    fn test_unrecognized_mode_still_checks_sites_against_simple_pattern() {
        let mut g = group("main", &["a.example.com"]);
        g.cert_mode = "bogus".into();
        let found = messages(&run(&[g]));
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("'cert_mode'"));
    }

    #[test]
    fn test_duplicate_site_also_checked_against_mode() {
        let mut g = group("main", &["eu.wrong.com", "eu.wrong.com"]);
        g.cert_mode = "*.corp.example.com".into();
        let found = messages(&run(&[g]));
        assert_eq!(found.len(), 3);
        assert!(found[0].starts_with("Duplicate found"));
        assert!(found[1].starts_with("Incorrect site field value: 'eu.wrong.com'"));
        assert!(found[2].starts_with("Incorrect site field value: 'eu.wrong.com'"));
    }
}
