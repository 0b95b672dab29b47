//! Document discovery
//!
//! Resolves command-line paths into the ordered list of documents to check.
//! Directories contribute their `*.json` files in name order; explicit files
//! must end in `.json`. Any unusable path stops the run.

use crate::config::compile_time::discovery::{MAX_DIRECTORY_DEPTH, MAX_DOCUMENTS};
use crate::file_processor::has_json_extension;
use crate::logging::codes;
use crate::{log_debug, log_error, log_info, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DOCUMENT_SUFFIX: &str = ".json";

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("{path}: {message}")]
    PathNotFound { path: String, message: String },

    #[error("Unsupported file extension: {path}")]
    UnsupportedExtension { path: String },

    #[error("No JSON files found.")]
    NoDocuments,

    #[error("Too many documents: {count} (max: {max})")]
    TooManyDocuments { count: usize, max: usize },

    #[error("Failed to read directory {path}: {message}")]
    WalkFailed { path: String, message: String },
}

impl DiscoveryError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DiscoveryError::PathNotFound { .. } => codes::discovery::PATH_NOT_FOUND,
            DiscoveryError::UnsupportedExtension { .. } => codes::discovery::UNSUPPORTED_EXTENSION,
            DiscoveryError::NoDocuments => codes::discovery::NO_DOCUMENTS,
            DiscoveryError::TooManyDocuments { .. } => codes::discovery::TOO_MANY_DOCUMENTS,
            DiscoveryError::WalkFailed { .. } => codes::discovery::DIRECTORY_WALK_FAILED,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Descend into subdirectories, up to the compile-time depth limit
    pub recursive: bool,
}

/// Resolve every input path, keeping argument order
pub fn discover_documents<P: AsRef<Path>>(
    inputs: &[P],
    options: &DiscoveryOptions,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut documents = Vec::new();

    for input in inputs {
        let found = resolve_input(input.as_ref(), options)?;
        documents.extend(found);

        if documents.len() > MAX_DOCUMENTS {
            let error = DiscoveryError::TooManyDocuments {
                count: documents.len(),
                max: MAX_DOCUMENTS,
            };
            log_error!(error.error_code(), "Document limit exceeded",
                "limit" => MAX_DOCUMENTS);
            return Err(error);
        }
    }

    if documents.is_empty() {
        let error = DiscoveryError::NoDocuments;
        log_error!(error.error_code(), "No documents to validate",
            "inputs" => inputs.len());
        return Err(error);
    }

    log_success!(codes::success::DISCOVERY_COMPLETE, "Document discovery completed",
        "documents" => documents.len(),
        "recursive" => options.recursive);

    Ok(documents)
}

fn resolve_input(path: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>, DiscoveryError> {
    let metadata = fs::metadata(path).map_err(|e| {
        let error = DiscoveryError::PathNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Input path is not accessible",
            "path" => path.display(),
            "io_error" => e);
        error
    })?;

    if metadata.is_dir() {
        let found = if options.recursive {
            walk_directory(path)?
        } else {
            list_directory(path)?
        };
        log_info!("Scanned directory",
            "directory" => path.display(),
            "documents" => found.len());
        return Ok(found);
    }

    if metadata.is_file() {
        if !has_json_extension(path) {
            let error = DiscoveryError::UnsupportedExtension {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "Input file is not a JSON document",
                "path" => path.display());
            return Err(error);
        }
        return Ok(vec![path.to_path_buf()]);
    }

    log_debug!("Skipping special file", "path" => path.display());
    Ok(Vec::new())
}

fn is_document_name(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map(|name| name.ends_with(DOCUMENT_SUFFIX))
        .unwrap_or(false)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let walk_error = |e: std::io::Error| DiscoveryError::WalkFailed {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(walk_error)? {
        let entry = entry.map_err(walk_error)?;
        let path = entry.path();
        if is_document_name(&entry.file_name()) && path.is_file() {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(MAX_DIRECTORY_DEPTH)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let error = DiscoveryError::WalkFailed {
                path: e
                    .path()
                    .unwrap_or(dir)
                    .display()
                    .to_string(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Directory walk failed", "error" => &error);
            error
        })?;

        if entry.file_type().is_file() && is_document_name(entry.file_name()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}
