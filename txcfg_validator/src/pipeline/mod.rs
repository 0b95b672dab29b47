//! Per-document pipeline: read, decode, validate, report violations to the log

mod error;
mod result;

pub use error::PipelineError;
pub use result::DocumentOutcome;

use crate::decode::{decode_document, LenientDecode};
use crate::file_processor::FileProcessor;
use crate::logging;
use crate::schema::{ReportTenant, TenantRecord};
use crate::validation::{Validate, Violation};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// Which record schema a document is checked against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Certificate provisioning tenants
    #[default]
    Certbot,
    /// Report delivery tenants
    Reports,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Certbot => "certbot",
            DocumentKind::Reports => "reports",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "certbot" => Ok(DocumentKind::Certbot),
            "reports" => Ok(DocumentKind::Reports),
            other => Err(format!("unknown document kind '{}'", other)),
        }
    }
}

/// Violations for one document's text, decode error first
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCheck {
    pub violations: Vec<Violation>,
    pub record_count: usize,
}

fn check_records<T: LenientDecode + Validate>(text: &str) -> DocumentCheck {
    let decoded = decode_document::<T>(text);

    let mut violations: Vec<Violation> = decoded.error.into_iter().collect();
    violations.extend(T::collect_violations(&decoded.records));

    DocumentCheck {
        violations,
        record_count: decoded.records.len(),
    }
}

/// Decode and validate document text without touching the filesystem
pub fn check_text(text: &str, kind: DocumentKind) -> DocumentCheck {
    match kind {
        DocumentKind::Certbot => check_records::<TenantRecord>(text),
        DocumentKind::Reports => check_records::<ReportTenant>(text),
    }
}

/// Run one document through the pipeline inside a logging file context.
/// Only a read failure is an `Err`; document problems are in the outcome.
pub fn process_document(
    path: &Path,
    kind: DocumentKind,
    file_id: usize,
    processor: &FileProcessor,
) -> Result<DocumentOutcome, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(path.to_path_buf(), file_id, || {
        crate::log_debug!("Checking document",
            "file" => path.display(),
            "kind" => kind);

        let file_result = processor.process_file(path)?;
        let check = check_text(&file_result.source, kind);

        for violation in &check.violations {
            let location = violation.location.to_string();
            crate::log_error!(violation.error_code(), &violation.message(),
                location = &location,
                "category" => violation.category().as_str()
            );
        }

        let outcome = DocumentOutcome {
            path: path.to_path_buf(),
            violations: check.violations,
            record_count: check.record_count,
            size_bytes: file_result.metadata.size,
            processing_duration: start_time.elapsed(),
        };
        outcome.log_result();

        Ok(outcome)
    })
}

/// Check a single document with preferences from the environment
pub fn process_file(path: &Path, kind: DocumentKind) -> Result<DocumentOutcome, PipelineError> {
    process_document(path, kind, 0, &FileProcessor::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;
    use crate::validation::ViolationKind;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const VALID_CERTBOT: &str = r#"[{
        "tenant": "acme",
        "env": "prod",
        "site_groups": [{"group_name": "main", "sites": ["a.example.com"], "cert_provider": "letsencrypt"}]
    }]"#;

    #[test]
    fn test_document_kind_parsing() {
        assert_eq!("certbot".parse::<DocumentKind>().unwrap(), DocumentKind::Certbot);
        assert_eq!("Reports".parse::<DocumentKind>().unwrap(), DocumentKind::Reports);
        assert!("yaml".parse::<DocumentKind>().is_err());
        assert_eq!(DocumentKind::default(), DocumentKind::Certbot);
    }

    #[test]
    fn test_check_text_valid() {
        let check = check_text(VALID_CERTBOT, DocumentKind::Certbot);
        assert!(check.violations.is_empty());
        assert_eq!(check.record_count, 1);
    }

    #[test]
    fn test_decode_error_precedes_validation_errors() {
        let check = check_text(r#"[{"tenant": 7, "env": "prod"}]"#, DocumentKind::Certbot);
        let messages: Vec<String> = check.violations.iter().map(Violation::message).collect();

        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("Incorrect JSON format: "));
        assert_eq!(messages[1], "Field 'tenant' not found or empty");
        assert_eq!(messages[2], "Field 'site_groups' not found or empty");
    }

    #[test]
    fn test_unparseable_text_yields_one_error() {
        let check = check_text("{not json", DocumentKind::Reports);
        assert_eq!(check.violations.len(), 1);
        assert_matches!(check.violations[0].kind, ViolationKind::MalformedDocument { .. });
        assert_eq!(check.record_count, 0);
    }

    #[test]
    fn test_same_text_checked_per_kind() {
        let text = r#"[{"tenant": "acme"}]"#;
        assert_eq!(check_text(text, DocumentKind::Certbot).violations.len(), 2);
        assert_eq!(check_text(text, DocumentKind::Reports).violations.len(), 2);
    }

    #[test]
    fn test_process_document_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tenants.json");
        fs::write(&path, VALID_CERTBOT).unwrap();

        let outcome = process_file(&path, DocumentKind::Certbot).unwrap();
        assert!(outcome.is_valid());
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.record_count, 1);
    }

    #[test]
    fn test_unreadable_document_is_an_error() {
        let dir = tempdir().unwrap();
        let result = process_file(&dir.path().join("absent.json"), DocumentKind::Certbot);
        assert_matches!(
            result,
            Err(PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. }))
        );
    }
}
