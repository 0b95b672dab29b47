//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the validator logs. Each code carries
//! a category, a severity and a recommended action so that console, JSON and
//! cargo-style output all describe a problem the same way.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Document decoding error codes
pub mod decoding {
    use super::Code;

    pub const MALFORMED_JSON: Code = Code::new("E020");
}

/// Document validation codes, one per violation kind
pub mod validation {
    use super::Code;

    pub const REQUIRED_FIELD_MISSING: Code = Code::new("E040");
    pub const VALUE_NOT_ALLOWED: Code = Code::new("E050");
    pub const SITE_MODE_MISMATCH: Code = Code::new("E060");
    pub const DUPLICATE_SITE: Code = Code::new("E070");
    pub const CREDENTIALS_INCOMPLETE: Code = Code::new("E080");
    pub const FIELD_FORMAT: Code = Code::new("E090");
    pub const VALUE_OUT_OF_RANGE: Code = Code::new("E091");
}

/// Document discovery error codes
pub mod discovery {
    use super::Code;

    pub const PATH_NOT_FOUND: Code = Code::new("E100");
    pub const UNSUPPORTED_EXTENSION: Code = Code::new("E101");
    pub const NO_DOCUMENTS: Code = Code::new("E102");
    pub const TOO_MANY_DOCUMENTS: Code = Code::new("E103");
    pub const DIRECTORY_WALK_FAILED: Code = Code::new("E104");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const WORKER_FAILURE: Code = Code::new("E110");
    pub const BATCH_ABORTED: Code = Code::new("E111");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const DOCUMENT_VALIDATION_PASSED: Code = Code::new("I007");

    pub const DECODING_COMPLETE: Code = Code::new("I020");
    pub const DISCOVERY_COMPLETE: Code = Code::new("I030");
    pub const BATCH_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTERED_CODES: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "Contact system administrator or file bug report",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File does not carry a .json extension",
        "Rename the document or pass its directory instead",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File exceeds the configured size limit",
        "Split the document or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied while reading file",
        "Check file permissions for the current user",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading file",
        "Check disk health and retry",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Path is empty or does not refer to a regular file",
        "Pass a path to a JSON document",
    ),
    // Decoding
    ErrorMetadata::new(
        "E020",
        "Decoding",
        Severity::High,
        true,
        false,
        "Document is not well-formed JSON",
        "Fix the JSON syntax reported by the parser",
    ),
    // Validation
    ErrorMetadata::new(
        "E040",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Required field is missing or empty",
        "Provide a non-empty value for the field",
    ),
    ErrorMetadata::new(
        "E050",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Field value is not one of the accepted values",
        "Use one of the values listed in the message",
    ),
    ErrorMetadata::new(
        "E060",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Site does not match the pattern implied by cert_mode",
        "Align the site name with the group's cert_mode",
    ),
    ErrorMetadata::new(
        "E070",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Site listed more than once for the same tenant",
        "Keep each site in exactly one site group",
    ),
    ErrorMetadata::new(
        "E080",
        "Validation",
        Severity::Medium,
        true,
        false,
        "External-account credentials are only partially provided",
        "Provide email, kid and hmac_key together or omit the bundle",
    ),
    ErrorMetadata::new(
        "E090",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Field value does not have the expected format",
        "Correct the value to match the documented format",
    ),
    ErrorMetadata::new(
        "E091",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Numeric field is outside its accepted range",
        "Use a value inside the range named in the message",
    ),
    // Discovery
    ErrorMetadata::new(
        "E100",
        "Discovery",
        Severity::High,
        false,
        true,
        "Input path does not exist",
        "Check the path passed on the command line",
    ),
    ErrorMetadata::new(
        "E101",
        "Discovery",
        Severity::High,
        false,
        true,
        "Input file is not a .json document",
        "Pass JSON documents or directories containing them",
    ),
    ErrorMetadata::new(
        "E102",
        "Discovery",
        Severity::High,
        false,
        true,
        "No JSON documents were found",
        "Check the directories passed on the command line",
    ),
    ErrorMetadata::new(
        "E103",
        "Discovery",
        Severity::High,
        false,
        true,
        "Too many documents for one run",
        "Validate the documents in smaller groups",
    ),
    ErrorMetadata::new(
        "E104",
        "Discovery",
        Severity::High,
        false,
        true,
        "Directory could not be listed",
        "Check directory permissions",
    ),
    // Batch
    ErrorMetadata::new(
        "E110",
        "Batch",
        Severity::Critical,
        false,
        true,
        "A validation worker terminated unexpectedly",
        "Re-run with --sequential and report the failing document",
    ),
    ErrorMetadata::new(
        "E111",
        "Batch",
        Severity::High,
        false,
        true,
        "Batch stopped before all documents were validated",
        "Fix the reported document and re-run",
    ),
    // Success
    ErrorMetadata::new(
        "I004",
        "Success",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "No action required",
    ),
    ErrorMetadata::new(
        "I006",
        "Success",
        Severity::Low,
        true,
        false,
        "File read successfully",
        "No action required",
    ),
    ErrorMetadata::new(
        "I007",
        "Success",
        Severity::Low,
        true,
        false,
        "Document passed validation",
        "No action required",
    ),
    ErrorMetadata::new(
        "I020",
        "Success",
        Severity::Low,
        true,
        false,
        "Document decoded",
        "No action required",
    ),
    ErrorMetadata::new(
        "I030",
        "Success",
        Severity::Low,
        true,
        false,
        "Documents discovered",
        "No action required",
    ),
    ErrorMetadata::new(
        "I040",
        "Success",
        Severity::Low,
        true,
        false,
        "Batch finished",
        "No action required",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED_CODES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
