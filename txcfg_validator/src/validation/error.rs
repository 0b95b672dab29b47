//! Violation types produced by document validation
//!
//! A violation is data, not a Rust error: validation never stops early, it
//! accumulates every violation in document order. The `Display` output of a
//! `ViolationKind` is the exact message shown to users.

use crate::logging::{codes, Code};
use crate::rules::SIMPLE_SITE_PATTERN;
use std::fmt;
use thiserror::Error;

// ============================================================================
// FIELD PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Index(usize),
    Field(&'static str),
}

/// Location of a value inside a document, e.g. `[0].site_groups[1].sites[2]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn field(&self, name: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<document>");
        }

        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Field(name) if position == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// VIOLATION TAXONOMY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Document could not be decoded into the expected shape
    Structural,
    RequiredField,
    EnumeratedValue,
    /// Field is valid alone but inconsistent with another field
    CrossField,
    Uniqueness,
    /// Fields that must be present together
    GroupedField,
    Format,
    Range,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::RequiredField => "required-field",
            Category::EnumeratedValue => "enumerated-value",
            Category::CrossField => "cross-field",
            Category::Uniqueness => "uniqueness",
            Category::GroupedField => "grouped-field",
            Category::Format => "format",
            Category::Range => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("Incorrect JSON format: {message}")]
    MalformedDocument { message: String },

    #[error("Field '{field}' not found or empty")]
    MissingField { field: &'static str },

    #[error("SG field '{field}' not found or empty")]
    MissingGroupField { field: &'static str },

    #[error("Duplicate found for site '{site}'")]
    DuplicateSite { site: String },

    #[error("Incorrect SG field '{field}' value: '{value}'. Value must be one of: {expected}")]
    ValueNotAllowed {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Field 'cert_provider_creds' has incorrect format")]
    IncompleteCredentials,

    #[error(
        "Incorrect site field value: '{}'. Value must correspond to site regex: '{}' and cert_mode '{}'",
        .site,
        SIMPLE_SITE_PATTERN,
        .cert_mode
    )]
    SiteModeMismatch { site: String, cert_mode: String },

    #[error("Field '{field}' does not match the expected format")]
    PatternMismatch { field: &'static str },

    #[error("Field '{field}' has incorrect format")]
    IncorrectFormat { field: &'static str },

    #[error("Field '{field}' has incorrect entries")]
    IncorrectEntries { field: &'static str },

    #[error("Field '{field}' can't be greater than {max} or less than {min}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl ViolationKind {
    pub fn category(&self) -> Category {
        match self {
            ViolationKind::MalformedDocument { .. } => Category::Structural,
            ViolationKind::MissingField { .. } | ViolationKind::MissingGroupField { .. } => {
                Category::RequiredField
            }
            ViolationKind::DuplicateSite { .. } => Category::Uniqueness,
            ViolationKind::ValueNotAllowed { .. } => Category::EnumeratedValue,
            ViolationKind::IncompleteCredentials => Category::GroupedField,
            ViolationKind::SiteModeMismatch { .. } => Category::CrossField,
            ViolationKind::PatternMismatch { .. }
            | ViolationKind::IncorrectFormat { .. }
            | ViolationKind::IncorrectEntries { .. } => Category::Format,
            ViolationKind::OutOfRange { .. } => Category::Range,
        }
    }

    /// Logging code used when the violation is reported
    pub fn error_code(&self) -> Code {
        match self {
            ViolationKind::MalformedDocument { .. } => codes::decoding::MALFORMED_JSON,
            ViolationKind::MissingField { .. } | ViolationKind::MissingGroupField { .. } => {
                codes::validation::REQUIRED_FIELD_MISSING
            }
            ViolationKind::DuplicateSite { .. } => codes::validation::DUPLICATE_SITE,
            ViolationKind::ValueNotAllowed { .. } => codes::validation::VALUE_NOT_ALLOWED,
            ViolationKind::IncompleteCredentials => codes::validation::CREDENTIALS_INCOMPLETE,
            ViolationKind::SiteModeMismatch { .. } => codes::validation::SITE_MODE_MISMATCH,
            ViolationKind::PatternMismatch { .. }
            | ViolationKind::IncorrectFormat { .. }
            | ViolationKind::IncorrectEntries { .. } => codes::validation::FIELD_FORMAT,
            ViolationKind::OutOfRange { .. } => codes::validation::VALUE_OUT_OF_RANGE,
        }
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub location: FieldPath,
}

impl Violation {
    pub fn new(kind: ViolationKind, location: FieldPath) -> Self {
        Self { kind, location }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn error_code(&self) -> Code {
        self.kind.error_code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Render violations as the ordered message list callers receive
pub fn messages(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(Violation::message).collect()
}
