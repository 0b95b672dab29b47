//! Tenant validation for certificate provisioning documents

use super::error::{FieldPath, Violation, ViolationKind};
use super::site_group::validate_site_group;
use crate::schema::TenantRecord;
use std::collections::HashSet;

pub fn validate_tenant(record: &TenantRecord, path: &FieldPath, violations: &mut Vec<Violation>) {
    if record.tenant.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "tenant" },
            path.field("tenant"),
        ));
    }

    if record.env.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "env" },
            path.field("env"),
        ));
    }

    let groups_path = path.field("site_groups");
    if record.site_groups.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "site_groups" },
            groups_path,
        ));
        return;
    }

    // One duplicate set per tenant, shared by all of its groups
    let mut seen_sites = HashSet::new();
    for (index, group) in record.site_groups.iter().enumerate() {
        validate_site_group(group, &groups_path.index(index), &mut seen_sites, violations);
    }
}
