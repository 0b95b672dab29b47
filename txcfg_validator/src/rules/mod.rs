//! Leaf rules: accepted value sets, compiled patterns and cert-mode resolution
//!
//! Everything here is immutable and initialized at most once per process.

pub mod cert_mode;
pub mod patterns;
pub mod values;

pub use cert_mode::CertMode;
pub use patterns::{CERT_MODE_PATTERN, CRON_PATTERN, LOGO_PATH_PATTERN, SIMPLE_SITE_PATTERN};
pub use values::{CERT_MODES, CERT_PROVIDERS, CERT_TYPES};
