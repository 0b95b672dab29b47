//! Validator for tenant provisioning configuration documents
//!
//! Documents are JSON arrays of tenant records. Each one is read, decoded
//! leniently, checked against the rules for its kind, and reported as either
//! valid or as an ordered list of human-readable issues.

// Internal modules
pub mod batch;
pub mod config;
pub mod decode;
pub mod discovery;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod schema;
pub mod validation;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use discovery::{discover_documents, DiscoveryError, DiscoveryOptions};
pub use pipeline::{DocumentKind, DocumentOutcome, PipelineError};
pub use report::{write_report, ReportOptions, RunStatus};
pub use schema::{CredentialBundle, ReportTenant, Schedule, SiteGroup, TenantRecord};
pub use validation::{validate_document, Violation, ViolationKind};
