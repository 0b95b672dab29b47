//! Compiled matching patterns for cert modes, sites and report fields
//!
//! The `*_PATTERN` constants are the pattern texts shown to users in
//! messages. They are compiled with ASCII shorthand classes (`\w` is
//! `[0-9A-Za-z_]`, `\d` is `[0-9]`, `\S` excludes only `\t\n\f\r` and space)
//! so that matching behaves the same for non-ASCII input as the provisioning
//! tooling that consumes these documents.

use regex::Regex;
use std::sync::OnceLock;

/// Cert mode requesting a wildcard certificate, e.g. `*.corp.example.com`
pub const CERT_MODE_PATTERN: &str = r"^\*\.\S+\.\w+$";

/// Site accepted when the cert mode is not a wildcard
pub const SIMPLE_SITE_PATTERN: &str = r"^\S+\.\w+$";

/// Report logo file name
pub const LOGO_PATH_PATTERN: &str = r".+\.(?:jpg|jpeg|png|svg|tiff|tif|webp|gif|bmp|avif|jfif)$";

/// Five to seven cron fields separated by single spaces
pub const CRON_PATTERN: &str =
    r"^((((\d+,)+\d+|(\d+([/\-])\d+)|\d+|\*(/\d+)?|[A-Z]{3}(-[A-Z]{3})?) ?){5,7})$";

/// Optional single leading label allowed in front of a wildcard suffix
const WILDCARD_LABEL_PREFIX: &str = r"^([a-zA-Z0-9-]+\.)?";

/// Rewrite shorthand classes to their ASCII definitions
fn ascii_classes(pattern: &str) -> String {
    pattern
        .replace(r"\S", r"[^\t\n\f\r ]")
        .replace(r"\w", r"[0-9A-Za-z_]")
        .replace(r"\d", r"[0-9]")
}

fn compile_static(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(&ascii_classes(pattern)).expect("built-in pattern must compile")
    })
}

pub fn cert_mode_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile_static(&CELL, CERT_MODE_PATTERN)
}

pub fn simple_site_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile_static(&CELL, SIMPLE_SITE_PATTERN)
}

pub fn logo_path_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile_static(&CELL, LOGO_PATH_PATTERN)
}

pub fn cron_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile_static(&CELL, CRON_PATTERN)
}

/// Site pattern for a wildcard cert mode: the suffix after `*.` matched
/// literally, with at most one extra label in front.
pub fn wildcard_site_regex(suffix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "{}{}$",
        WILDCARD_LABEL_PREFIX,
        regex::escape(suffix)
    ))
}
