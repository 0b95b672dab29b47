//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use std::path::Path;

pub use processor::{
    has_json_extension, path_extension, FileMetadata, FileProcessingResult, FileProcessor,
    FileProcessorError, JSON_EXTENSION,
};

/// Read a document using preferences from the environment
pub fn process_file(path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Size limit baked into the binary; not adjustable at runtime
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}
