//! Single-field checks used by the site-group validator
//!
//! Each check passes or returns the violation it found; callers decide where
//! the violation lives in the document.

use super::error::ViolationKind;
use crate::rules::values::{expected_list, is_valid_cert_provider, is_valid_cert_type};
use crate::rules::{CertMode, CERT_MODES, CERT_MODE_PATTERN, CERT_PROVIDERS, CERT_TYPES};
use crate::schema::CredentialBundle;

pub fn check_cert_mode(raw: &str, mode: &CertMode<'_>) -> Result<(), ViolationKind> {
    if mode.is_recognized() {
        return Ok(());
    }

    Err(ViolationKind::ValueNotAllowed {
        field: "cert_mode",
        value: raw.to_string(),
        expected: format!(
            "{}, or regex '{}'",
            expected_list(&CERT_MODES),
            CERT_MODE_PATTERN
        ),
    })
}

pub fn check_cert_provider(provider: &str) -> Result<(), ViolationKind> {
    if is_valid_cert_provider(provider) {
        return Ok(());
    }

    Err(ViolationKind::ValueNotAllowed {
        field: "cert_provider",
        value: provider.to_string(),
        expected: expected_list(&CERT_PROVIDERS),
    })
}

pub fn check_cert_type(cert_type: &str) -> Result<(), ViolationKind> {
    if is_valid_cert_type(cert_type) {
        return Ok(());
    }

    Err(ViolationKind::ValueNotAllowed {
        field: "cert_type",
        value: cert_type.to_string(),
        expected: expected_list(&CERT_TYPES),
    })
}

/// Credentials are all-or-nothing
pub fn check_credentials(creds: Option<&CredentialBundle>) -> Result<(), ViolationKind> {
    match creds {
        Some(bundle) if !bundle.is_complete() => Err(ViolationKind::IncompleteCredentials),
        _ => Ok(()),
    }
}

pub fn check_site(site: &str, raw_mode: &str, mode: &CertMode<'_>) -> Result<(), ViolationKind> {
    if mode.accepts_site(site) {
        return Ok(());
    }

    Err(ViolationKind::SiteModeMismatch {
        site: site.to_string(),
        cert_mode: raw_mode.to_string(),
    })
}
