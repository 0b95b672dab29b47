//! Record types for the document kinds the validator understands

pub mod certbot;
pub mod reports;

pub use certbot::{CredentialBundle, SiteGroup, TenantRecord};
pub use reports::{Features, ReportTenant, Schedule};
