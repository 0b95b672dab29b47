//! Cert-mode resolution
//!
//! A site group's `cert_mode` decides which sites it may list. The raw string
//! is resolved once per group and the resulting variant answers both "is this
//! mode acceptable" and "does this site belong to it".

use super::patterns::{cert_mode_regex, simple_site_regex, wildcard_site_regex};
use super::values::is_fixed_cert_mode;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum CertMode<'a> {
    /// Empty mode: provisioning default
    Default,
    /// `san` or `classic`
    FixedLiteral(&'a str),
    /// `*.<suffix>`; `site_pattern` is `None` only if the derived pattern
    /// exceeds the regex size limit, in which case no site is accepted
    WildcardDomain {
        suffix: &'a str,
        site_pattern: Option<Regex>,
    },
    /// Anything else; fails the cert-mode check
    Unrecognized(&'a str),
}

impl<'a> CertMode<'a> {
    pub fn resolve(raw: &'a str) -> Self {
        if raw.is_empty() {
            return CertMode::Default;
        }

        if is_fixed_cert_mode(raw) {
            return CertMode::FixedLiteral(raw);
        }

        if cert_mode_regex().is_match(raw) {
            // The pattern guarantees a leading "*."
            let suffix = &raw[2..];
            return CertMode::WildcardDomain {
                suffix,
                site_pattern: wildcard_site_regex(suffix).ok(),
            };
        }

        CertMode::Unrecognized(raw)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, CertMode::Unrecognized(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, CertMode::WildcardDomain { .. })
    }

    /// Whether `site` may be listed under this mode. Non-wildcard modes,
    /// including unrecognized ones, fall back to the simple site pattern.
    pub fn accepts_site(&self, site: &str) -> bool {
        match self {
            CertMode::WildcardDomain { site_pattern, .. } => site_pattern
                .as_ref()
                .map(|pattern| pattern.is_match(site))
                .unwrap_or(false),
            CertMode::Default | CertMode::FixedLiteral(_) | CertMode::Unrecognized(_) => {
                simple_site_regex().is_match(site)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_resolve_variants() {
        assert_matches!(CertMode::resolve(""), CertMode::Default);
        assert_matches!(CertMode::resolve("san"), CertMode::FixedLiteral("san"));
        assert_matches!(CertMode::resolve("classic"), CertMode::FixedLiteral("classic"));
        assert_matches!(
            CertMode::resolve("*.corp.example.com"),
            CertMode::WildcardDomain { suffix: "corp.example.com", site_pattern: Some(_) }
        );
        assert_matches!(CertMode::resolve("wildcard"), CertMode::Unrecognized("wildcard"));
        assert_matches!(CertMode::resolve("*.com"), CertMode::Unrecognized(_));
    }

    #[test]
    fn test_recognition() {
        assert!(CertMode::resolve("").is_recognized());
        assert!(CertMode::resolve("*.example.com").is_recognized());
        assert!(!CertMode::resolve("SAN").is_recognized());
        assert!(CertMode::resolve("*.example.com").is_wildcard());
        assert!(!CertMode::resolve("san").is_wildcard());
    }

    #[test]
    fn test_wildcard_site_acceptance() {
        let mode = CertMode::resolve("*.corp.example.com");
        assert!(mode.accepts_site("eu.corp.example.com"));
        assert!(mode.accepts_site("corp.example.com"));
        assert!(!mode.accepts_site("eu.wrong.com"));
        assert!(!mode.accepts_site("a.b.corp.example.com"));
    }

    #[test]
    fn test_non_wildcard_modes_use_simple_pattern() {
        for raw in ["", "san", "classic", "bogus"] {
            let mode = CertMode::resolve(raw);
            assert!(mode.accepts_site("a.example.com"), "mode {:?}", raw);
            assert!(!mode.accepts_site("localhost"), "mode {:?}", raw);
        }
    }
}
