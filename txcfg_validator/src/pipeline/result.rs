use crate::logging::codes;
use crate::validation::{messages, Violation};
use std::path::PathBuf;
use std::time::Duration;

/// Result of checking one document that could be read
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    /// Decode error first, then validation violations in document order
    pub violations: Vec<Violation>,
    pub record_count: usize,
    pub size_bytes: u64,
    pub processing_duration: Duration,
}

impl DocumentOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        messages(&self.violations)
    }

    pub fn log_result(&self) {
        let duration_ms = format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0);

        if self.is_valid() {
            crate::log_success!(
                codes::success::DOCUMENT_VALIDATION_PASSED,
                "Document validation passed",
                "file" => self.path.display(),
                "records" => self.record_count,
                "duration_ms" => duration_ms
            );
        } else {
            crate::log_info!("Document validation failed",
                "file" => self.path.display(),
                "records" => self.record_count,
                "violations" => self.violations.len(),
                "duration_ms" => duration_ms
            );
        }
    }
}
