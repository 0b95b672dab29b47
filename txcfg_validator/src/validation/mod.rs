//! Document validation engine
//!
//! Pure functions from decoded records to an ordered list of violations.
//! Nothing here logs or touches the filesystem; the pipeline reports the
//! violations once a document has been checked.

pub mod document;
pub mod error;
pub mod fields;
pub mod reports;
pub mod site_group;
pub mod tenant;

pub use document::{collect_violations, validate_document};
pub use error::{messages, Category, FieldPath, PathSegment, Violation, ViolationKind};
pub use reports::collect_report_violations;

use crate::schema::{ReportTenant, TenantRecord};

/// Record types that can be validated as a whole document
pub trait Validate: Sized {
    fn collect_violations(records: &[Self]) -> Vec<Violation>;
}

impl Validate for TenantRecord {
    fn collect_violations(records: &[Self]) -> Vec<Violation> {
        document::collect_violations(records)
    }
}

impl Validate for ReportTenant {
    fn collect_violations(records: &[Self]) -> Vec<Violation> {
        reports::collect_report_violations(records)
    }
}
