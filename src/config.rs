use crate::error::{ConverterError, ErrorContext};
use crate::scanner::ScanOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_PATH: &str = "data.csv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Converter settings, read from an optional TOML file and overridden by flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Directory holding the `.json` capture files
    pub input_dir: PathBuf,
    /// Table to (re)write
    pub output_path: PathBuf,
    /// Process files sorted by name instead of listing order
    pub sort_files: bool,
    /// Log every row as it is written
    pub trace_rows: bool,
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Optional plain-text log file
    pub log_file: Option<PathBuf>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sort_files: false,
            trace_rows: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl ConverterConfig {
    pub fn scan_order(&self) -> ScanOrder {
        if self.sort_files {
            ScanOrder::Sorted
        } else {
            ScanOrder::Listing
        }
    }
}

pub fn load_config(path: &Path) -> Result<ConverterConfig, ConverterError> {
    let content = fs::read_to_string(path)
        .context(&format!("Failed to read config file {}", path.display()))?;
    let config: ConverterConfig = toml::from_str(&content)
        .context(&format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
