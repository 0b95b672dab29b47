//! Per-document event collection with cargo-style output
//!
//! Workers validating documents in parallel record events here, keyed by the
//! document path, so the final report groups problems by file.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for the document a thread is working on
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            self.successful_files as f64 / self.total_files as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe event collector for batch processing
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific file, capped per file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().any(|e| e.is_error()))
            .unwrap_or(false)
    }

    pub fn get_files_with_errors(&self) -> Vec<PathBuf> {
        lock(&self.file_events)
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.is_error()))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Summary over every file that was either entered or reported on
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);
        let contexts = lock(&self.file_contexts);

        let all_files: BTreeSet<&PathBuf> = events.keys().chain(contexts.keys()).collect();

        let mut summary = ProcessingSummary {
            total_files: all_files.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        for file_path in all_files {
            let file_events = events.get(file_path).map(Vec::as_slice).unwrap_or(&[]);
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            summary.total_errors += errors;
            summary.total_warnings += warnings;

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }
        }

        summary
    }

    pub fn total_event_count(&self) -> usize {
        lock(&self.file_events).values().map(Vec::len).sum()
    }

    /// (current, max, fraction) against the compile-time buffer size
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        let percentage = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, percentage)
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

fn push_context(output: &mut String, event: &LogEvent) {
    let mut keys: Vec<_> = event
        .context
        .keys()
        .filter(|key| key.as_str() != "file" && key.as_str() != "file_id")
        .collect();
    keys.sort();
    for key in keys {
        output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
    }
}

/// Format collected events in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if error_events.is_empty() && warning_events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in error_events {
            output.push_str(&format!("error[{}]: {}\n", event.code, event.message));
            if let Some(location) = &event.location {
                output.push_str(&format!("  --> {}: {}\n", file_path.display(), location));
            }
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            push_context(&mut output, event);

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warning_events {
            output.push_str(&format!("warning[{}]: {}\n", event.code, event.message));
            push_context(&mut output, event);
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    output.push_str(&format!(
        "Checked {} file(s): {} passed, {} failed",
        summary.total_files, summary.successful_files, summary.failed_files
    ));
    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("\nTotal warnings: {}", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("tenants.json");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::validation::DUPLICATE_SITE, "Duplicate"),
        );

        assert_eq!(collector.get_file_events(&file_path).len(), 1);
        assert!(collector.file_has_errors(&file_path));
        assert_eq!(collector.get_files_with_errors(), vec![file_path]);
    }

    #[test]
    fn test_summary_counts_files_without_events() {
        let collector = ErrorCollector::new();
        let clean = PathBuf::from("clean.json");
        let broken = PathBuf::from("broken.json");
        let noisy = PathBuf::from("noisy.json");

        collector.record_file_context(FileProcessingContext::new(clean, 0));
        collector.record_event(
            &broken,
            LogEvent::error(codes::decoding::MALFORMED_JSON, "Error"),
        );
        collector.record_event(&noisy, LogEvent::warning("Warning"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_per_file_event_cap() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("big.json");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(
                &file_path,
                LogEvent::error(codes::validation::VALUE_NOT_ALLOWED, "bad"),
            );
        }

        let events = collector.get_file_events(&file_path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events.last().unwrap().is_warning());
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("tenants.json");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::validation::DUPLICATE_SITE, "Duplicate found for site 'a.b'")
                .with_location("[0].site_groups[1].sites[0]")
                .with_context("site", "a.b"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking tenants.json..."));
        assert!(output.contains("error[E070]: Duplicate found for site 'a.b'"));
        assert!(output.contains("--> tenants.json: [0].site_groups[1].sites[0]"));
        assert!(output.contains("= site: a.b"));
        assert!(output.contains("Total errors: 1"));
    }

    #[test]
    fn test_capacity_and_clear() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("tenants.json");

        collector.record_event(&file_path, LogEvent::warning("Test"));
        let (current, max, _) = collector.get_capacity_info();
        assert_eq!(current, 1);
        assert_eq!(max, LOG_BUFFER_SIZE);

        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
    }
}
