//! Event file discovery - finds the `.json` capture files in an input directory

use crate::error::ConverterError;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of capture files; matched case-sensitively
pub const EVENT_FILE_SUFFIX: &str = ".json";

/// Order in which event files are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Whatever order the platform's directory listing yields
    #[default]
    Listing,
    /// Sorted by file name, for reproducible output
    Sorted,
}

/// Check if a file name looks like an event capture file
pub fn is_event_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.ends_with(EVENT_FILE_SUFFIX))
        .unwrap_or(false)
}

/// List the event files directly inside `dir` (not recursive)
pub fn list_event_files(dir: &Path, order: ScanOrder) -> Result<Vec<PathBuf>, ConverterError> {
    let not_found = |source| ConverterError::InputNotFound {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir).map_err(not_found)?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(not_found)?;
        let path = entry.path();
        if path.is_file() && is_event_file(&path) {
            files.push(path);
        }
    }

    if order == ScanOrder::Sorted {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    Ok(files)
}
