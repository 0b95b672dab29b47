//! Batch processing for document validation
//!
//! Runs the pipeline over discovered documents either sequentially or on a
//! bounded set of std threads. Results always come back in discovery order,
//! whatever order the workers finish in.

use crate::config::compile_time::batch_processing::MAX_WORKER_THREADS;
use crate::config::runtime::FileProcessorPreferences;
use crate::file_processor::FileProcessor;
use crate::logging::codes;
use crate::pipeline::{self, DocumentKind, DocumentOutcome, PipelineError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub kind: DocumentKind,
    /// Requested workers; clamped to the compile-time limit and document count
    pub max_threads: usize,
    /// Stop after the first document that fails validation
    pub fail_fast: bool,
    pub file_preferences: FileProcessorPreferences,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            kind: DocumentKind::default(),
            max_threads: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .min(MAX_WORKER_THREADS),
            fail_fast: false,
            file_preferences: FileProcessorPreferences::default(),
        }
    }
}

impl BatchConfig {
    pub fn sequential(mut self) -> Self {
        self.max_threads = 1;
        self
    }

    fn effective_threads(&self, documents: usize) -> usize {
        self.max_threads.min(MAX_WORKER_THREADS).min(documents).max(1)
    }
}

/// A document that could not be read; ends the run
#[derive(Debug, Clone)]
pub struct FatalDocumentError {
    pub path: PathBuf,
    pub error: PipelineError,
}

#[derive(Debug, Default)]
pub struct BatchResults {
    /// Checked documents in discovery order, up to any stopping point
    pub outcomes: Vec<DocumentOutcome>,
    pub fatal: Option<FatalDocumentError>,
    pub stopped_early: bool,
    pub files_discovered: usize,
    pub processing_duration: Duration,
}

impl BatchResults {
    pub fn files_processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_valid()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn has_failures(&self) -> bool {
        self.fatal.is_some() || self.failure_count() > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} of {} documents checked, {} valid, {} invalid, {:.2}s total",
            self.files_processed(),
            self.files_discovered,
            self.success_count(),
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }

    /// Keep results in order up to the first stopping point
    fn collect(
        slots: Vec<Option<Result<DocumentOutcome, PipelineError>>>,
        paths: &[PathBuf],
        fail_fast: bool,
    ) -> Self {
        let mut results = BatchResults {
            files_discovered: paths.len(),
            ..BatchResults::default()
        };

        for (slot, path) in slots.into_iter().zip(paths) {
            match slot {
                Some(Ok(outcome)) => {
                    let failed = !outcome.is_valid();
                    results.outcomes.push(outcome);
                    if failed && fail_fast {
                        results.stopped_early = true;
                        break;
                    }
                }
                Some(Err(error)) => {
                    results.fatal = Some(FatalDocumentError {
                        path: path.clone(),
                        error,
                    });
                    break;
                }
                None => {
                    results.stopped_early = true;
                    break;
                }
            }
        }

        if results.outcomes.len() + usize::from(results.fatal.is_some()) < paths.len() {
            results.stopped_early = true;
        }
        results
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Worker thread panicked while checking documents")]
    WorkerPanicked,
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::WorkerPanicked => codes::batch::WORKER_FAILURE,
        }
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

fn run_one(
    path: &Path,
    file_id: usize,
    config: &BatchConfig,
    processor: &FileProcessor,
) -> Result<DocumentOutcome, PipelineError> {
    let result = pipeline::process_document(path, config.kind, file_id, processor);
    if let Err(error) = &result {
        crate::log_error!(codes::batch::BATCH_ABORTED, "Document could not be read",
            "file" => path.display(),
            "error" => error);
    }
    result
}

fn stops_run(result: &Result<DocumentOutcome, PipelineError>, fail_fast: bool) -> bool {
    match result {
        Ok(outcome) => fail_fast && !outcome.is_valid(),
        Err(_) => true,
    }
}

pub fn process_sequential(documents: &[PathBuf], config: &BatchConfig) -> BatchResults {
    let start_time = Instant::now();
    let processor = FileProcessor::from_preferences(&config.file_preferences);

    crate::log_info!("Starting sequential batch processing",
        "documents" => documents.len(),
        "kind" => config.kind);

    let mut slots = Vec::with_capacity(documents.len());
    for (file_id, path) in documents.iter().enumerate() {
        let result = run_one(path, file_id, config, &processor);
        let stop = stops_run(&result, config.fail_fast);
        slots.push(Some(result));
        if stop {
            break;
        }
    }
    slots.resize_with(documents.len(), || None);

    let mut results = BatchResults::collect(slots, documents, config.fail_fast);
    results.processing_duration = start_time.elapsed();
    log_completion(&results, 1);
    results
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn process_parallel(
    documents: &[PathBuf],
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.effective_threads(documents.len());

    crate::log_info!("Starting parallel batch processing",
        "documents" => documents.len(),
        "threads" => threads,
        "kind" => config.kind);

    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let slots: Mutex<Vec<Option<Result<DocumentOutcome, PipelineError>>>> =
        Mutex::new((0..documents.len()).map(|_| None).collect());

    let joined = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let (next, stop, slots) = (&next, &stop, &slots);
                scope.spawn(move || {
                    let processor = FileProcessor::from_preferences(&config.file_preferences);
                    crate::log_debug!("Worker started", "worker" => worker);

                    while !stop.load(Ordering::Relaxed) {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = documents.get(index) else {
                            break;
                        };

                        let result = run_one(path, index, config, &processor);
                        if stops_run(&result, config.fail_fast) {
                            stop.store(true, Ordering::Relaxed);
                        }
                        lock(slots)[index] = Some(result);
                    }
                })
            })
            .collect();

        // Every handle must be joined before the scope ends
        let outcomes: Vec<bool> = handles
            .into_iter()
            .map(|handle| handle.join().is_ok())
            .collect();
        outcomes.into_iter().all(|ok| ok)
    });

    if !joined {
        let error = BatchError::WorkerPanicked;
        crate::log_error!(error.error_code(), "Batch worker failed");
        return Err(error);
    }

    let slots = slots.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut results = BatchResults::collect(slots, documents, config.fail_fast);
    results.processing_duration = start_time.elapsed();
    log_completion(&results, threads);
    Ok(results)
}

fn log_completion(results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch processing completed",
        "documents" => results.files_processed(),
        "valid" => results.success_count(),
        "invalid" => results.failure_count(),
        "stopped_early" => results.stopped_early,
        "threads" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Check documents with the configured degree of parallelism
pub fn process_documents(
    documents: &[PathBuf],
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads(documents.len()) == 1 {
        Ok(process_sequential(documents, config))
    } else {
        process_parallel(documents, config)
    }
}
