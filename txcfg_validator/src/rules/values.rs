//! Closed sets of accepted literal values
//!
//! An empty value is always accepted: it selects the provisioning default.

/// Certificate authorities the provisioning pipeline can talk to
pub const CERT_PROVIDERS: [&str; 8] = [
    "letsencrypt",
    "buypass",
    "zerossl",
    "sslcom",
    "google",
    "google_test",
    "buypass_test",
    "letsencrypt_test",
];

/// Key algorithms and sizes
pub const CERT_TYPES: [&str; 5] = ["ec-256", "ec-384", "2048", "3072", "4096"];

/// Fixed cert modes; wildcard modes are matched by pattern instead
pub const CERT_MODES: [&str; 2] = ["san", "classic"];

pub fn is_valid_cert_provider(provider: &str) -> bool {
    provider.is_empty() || CERT_PROVIDERS.contains(&provider)
}

pub fn is_valid_cert_type(cert_type: &str) -> bool {
    cert_type.is_empty() || CERT_TYPES.contains(&cert_type)
}

pub fn is_fixed_cert_mode(mode: &str) -> bool {
    CERT_MODES.contains(&mode)
}

/// Accepted values as they appear in messages: `a, b, c`
pub fn expected_list(values: &[&str]) -> String {
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_select_defaults() {
        assert!(is_valid_cert_provider(""));
        assert!(is_valid_cert_type(""));
    }

    #[test]
    fn test_provider_set_is_exact() {
        assert!(is_valid_cert_provider("letsencrypt_test"));
        assert!(!is_valid_cert_provider("LetsEncrypt"));
        assert!(!is_valid_cert_provider("unknownca"));
    }

    #[test]
    fn test_cert_types() {
        assert!(is_valid_cert_type("ec-384"));
        assert!(is_valid_cert_type("4096"));
        assert!(!is_valid_cert_type("1024"));
        assert!(!is_valid_cert_type(" 2048"));
    }

    #[test]
    fn test_fixed_modes() {
        assert!(is_fixed_cert_mode("san"));
        assert!(is_fixed_cert_mode("classic"));
        assert!(!is_fixed_cert_mode("SAN"));
        assert!(!is_fixed_cert_mode(""));
    }

    #[test]
    fn test_expected_list_rendering() {
        assert_eq!(
            expected_list(&CERT_PROVIDERS),
            "letsencrypt, buypass, zerossl, sslcom, google, google_test, buypass_test, letsencrypt_test"
        );
        assert_eq!(expected_list(&CERT_TYPES), "ec-256, ec-384, 2048, 3072, 4096");
    }
}
