//! Document decoding
//!
//! Turns document text into records without ever failing outright. Syntax
//! errors yield no records; shape errors yield partially populated records.
//! Either way at most one `MalformedDocument` violation is returned, and it
//! is placed ahead of any validation violations by the pipeline.

pub mod lenient;

pub use lenient::{LenientDecode, ObjectReader, ShapeIssues};

use crate::validation::error::{FieldPath, Violation, ViolationKind};
use crate::logging::codes;
use crate::{log_debug, log_success};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument<T> {
    pub records: Vec<T>,
    pub error: Option<Violation>,
}

impl<T> DecodedDocument<T> {
    fn failed(message: String, location: FieldPath) -> Self {
        Self {
            records: Vec::new(),
            error: Some(Violation::new(
                ViolationKind::MalformedDocument { message },
                location,
            )),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode a top-level JSON array of records
pub fn decode_document<T: LenientDecode>(text: &str) -> DecodedDocument<T> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(error) => {
            log_debug!("Document is not valid JSON",
                "line" => error.line(),
                "column" => error.column()
            );
            return DecodedDocument::failed(error.to_string(), FieldPath::root());
        }
    };

    let root = FieldPath::root();
    let mut issues = ShapeIssues::default();
    let records = match &value {
        Value::Array(_) => Vec::<T>::decode_lenient(&value, &root, &mut issues),
        Value::Null => Vec::new(),
        other => {
            // Records are not read out of a non-array top level
            let _ = Vec::<T>::decode_lenient(other, &root, &mut issues);
            Vec::new()
        }
    };

    let error = issues
        .into_first()
        .map(|(message, location)| Violation::new(ViolationKind::MalformedDocument { message }, location));

    if error.is_none() {
        log_success!(codes::success::DECODING_COMPLETE, "Document decoded",
            "records" => records.len());
    }

    DecodedDocument { records, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TenantRecord;
    use assert_matches::assert_matches;

    #[test]
    fn test_clean_document() {
        let decoded: DecodedDocument<TenantRecord> =
            decode_document(r#"[{"tenant": "acme", "env": "prod", "site_groups": []}]"#);
        assert!(decoded.is_clean());
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].tenant, "acme");
    }

    #[test]
    fn test_syntax_error_yields_no_records() {
        let decoded: DecodedDocument<TenantRecord> = decode_document(r#"[{"tenant": "acme""#);
        assert!(decoded.records.is_empty());
        let error = decoded.error.unwrap();
        assert!(error.message().starts_with("Incorrect JSON format: "));
        assert!(error.location.is_root());
    }

    #[test]
    fn test_empty_file_is_a_syntax_error() {
        let decoded: DecodedDocument<TenantRecord> = decode_document("");
        assert!(decoded.records.is_empty());
        assert_matches!(
            decoded.error.map(|v| v.kind),
            Some(ViolationKind::MalformedDocument { .. })
        );
    }

    #[test]
    fn test_top_level_null_is_empty_and_clean() {
        let decoded: DecodedDocument<TenantRecord> = decode_document("null");
        assert!(decoded.is_clean());
        assert!(decoded.records.is_empty());
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let decoded: DecodedDocument<TenantRecord> =
            decode_document(r#"{"tenant": "acme", "env": "prod"}"#);
        assert!(decoded.records.is_empty());
        assert!(!decoded.is_clean());
    }

    #[test]
    fn test_shape_error_keeps_partial_records() {
        let decoded: DecodedDocument<TenantRecord> = decode_document(
            r#"[{"tenant": 42, "env": "prod"}, {"tenant": "beta", "env": ["x"]}]"#,
        );
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].tenant, "");
        assert_eq!(decoded.records[0].env, "prod");
        assert_eq!(decoded.records[1].tenant, "beta");

        let error = decoded.error.unwrap();
        assert_eq!(error.location.to_string(), "[0].tenant");
        assert!(error.message().contains("invalid type"));
    }
}
