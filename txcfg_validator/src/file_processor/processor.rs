//! Document reader with compile-time size limits and global logging integration

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Extension a document must carry when the extension check is on
pub const JSON_EXTENSION: &str = "json";

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("No such file or directory: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .json, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(error: std::io::Error, path: &Path, action: &str) -> Self {
        match error.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), error),
            },
        }
    }
}

/// File metadata collected before reading
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Path as given by the caller
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    pub fn has_json_extension(&self) -> bool {
        has_json_extension(&self.path)
    }
}

/// Text after the last `.` anywhere in the path; `None` when there is no dot
pub fn path_extension(path: &Path) -> Option<String> {
    let text = path.to_string_lossy();
    text.rfind('.').map(|index| text[index + 1..].to_string())
}

/// Extension rule shared by discovery and reading. A dotless path is its own
/// extension, so a file literally named `json` qualifies.
pub fn has_json_extension(path: &Path) -> bool {
    match path_extension(path) {
        Some(extension) => extension == JSON_EXTENSION,
        None => path.to_string_lossy() == JSON_EXTENSION,
    }
}

fn human_readable(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Document text plus what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

/// Reads documents; limits are compile-time, preferences are runtime
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_json_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::from_preferences(&FileProcessorPreferences::default())
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_json_extension: prefs.require_json_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_json_extension_required(mut self, required: bool) -> Self {
        self.require_json_extension = required;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a document and return its text with metadata
    pub fn process_file(&self, path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let display = path.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        // Step 1: Path validation
        self.validate_path(path)?;

        // Step 2: Metadata collection
        let metadata = self.get_metadata(path)?;

        // Step 3: Size and extension
        self.validate_file(&metadata)?;

        // Step 4: Content
        let source = self.read_file(path)?;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File read successfully",
                "file" => display,
                "size" => result.metadata.human_readable_size(),
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
            );
        }

        Ok(result)
    }

    fn validate_path(&self, path: &Path) -> Result<(), FileProcessorError> {
        if path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => path.display());
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => path.display());
            return Err(error);
        }

        Ok(())
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(e, path, "read metadata for");
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "error" => &error);
            error
        })?;

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path_extension(path),
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => metadata.path.display(),
                "size" => metadata.human_readable_size(),
                "limit" => human_readable(MAX_FILE_SIZE));
            return Err(error);
        }

        if self.enable_performance_logging && metadata.is_large_file() {
            log_warning!("Large document",
                "file" => metadata.path.display(),
                "size" => metadata.human_readable_size());
        }

        if self.require_json_extension && !metadata.has_json_extension() {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .json extension",
                "file" => metadata.path.display(),
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }

    /// Invalid UTF-8 is not a read failure: offending bytes become U+FFFD and
    /// the decoder reports whatever that breaks.
    fn read_file(&self, path: &Path) -> Result<String, FileProcessorError> {
        match fs::read(path) {
            Ok(bytes) => {
                log_debug!("File content read", "bytes" => bytes.len());
                Ok(match String::from_utf8(bytes) {
                    Ok(content) => content,
                    Err(e) => {
                        log_warning!("Document is not valid UTF-8, invalid bytes replaced",
                            "file" => path.display(),
                            "valid_up_to" => e.utf8_error().valid_up_to());
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                })
            }
            Err(e) => {
                let error = FileProcessorError::from_io(e, path, "read file");
                log_error!(error.error_code(), "Failed to read file",
                    "file" => path.display(),
                    "error" => &error);
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn processor() -> FileProcessor {
        FileProcessor {
            require_json_extension: true,
            enable_performance_logging: false,
        }
    }

    #[test]
    fn test_reads_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tenants.json");
        fs::write(&path, "[]").unwrap();

        let result = processor().process_file(&path).unwrap();
        assert_eq!(result.source, "[]");
        assert_eq!(result.metadata.size, 2);
        assert!(result.metadata.has_json_extension());
    }

    #[test]
    fn test_empty_file_is_read_not_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "").unwrap();

        let result = processor().process_file(&path).unwrap();
        assert!(result.source.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let error = processor()
            .process_file(&dir.path().join("absent.json"))
            .unwrap_err();
        assert_matches!(error, FileProcessorError::FileNotFound { .. });
        assert_eq!(error.error_code(), codes::file_processing::FILE_NOT_FOUND);
        assert!(error.to_string().starts_with("No such file or directory: "));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        assert_matches!(
            processor().process_file(dir.path()),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tenants.JSON");
        fs::write(&path, "[]").unwrap();

        assert_matches!(
            processor().process_file(&path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ref ext) }) if ext == "JSON"
        );
        assert!(processor()
            .with_json_extension_required(false)
            .process_file(&path)
            .is_ok());
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        fs::write(&path, b"[{\"tenant\": \"caf\xe9\"}]").unwrap();

        let result = processor().process_file(&path).unwrap();
        assert_eq!(result.source, "[{\"tenant\": \"caf\u{FFFD}\"}]");
    }

    #[test]
    fn test_dot_json_file_has_json_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".json");
        fs::write(&path, "[]").unwrap();

        let result = processor().process_file(&path).unwrap();
        assert_eq!(result.metadata.extension.as_deref(), Some("json"));
        assert!(result.metadata.has_json_extension());
    }

    #[test]
    fn test_extension_is_taken_after_last_dot() {
        assert!(has_json_extension(Path::new("tenants.json")));
        assert!(has_json_extension(Path::new("dir.d/tenants.json")));
        assert!(has_json_extension(Path::new("dir/.json")));
        assert!(!has_json_extension(Path::new("tenants.json.bak")));
        assert!(!has_json_extension(Path::new("tenants.Json")));
        assert_eq!(path_extension(Path::new("tenants")), None);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable(512), "512 B");
        assert_eq!(human_readable(2048), "2.00 KB");
        assert_eq!(human_readable(5 * 1024 * 1024), "5.00 MB");
    }
}
