use std::path::PathBuf;
use thiserror::Error;

/// Input log converter errors
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Input directory (or one of its event files) is missing or unreadable
    #[error("Input not found: {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Event file is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Event has the wrong shape for its recognized type
    #[error("Malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// Output table cannot be created or written
    #[error("Failed to write output {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConverterError {
    fn from(err: toml::de::Error) -> Self {
        ConverterError::Config(err.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> Result<T, ConverterError>;
}

impl<T, E: Into<ConverterError>> ErrorContext<T> for Result<T, E> {
    fn context(self, msg: &str) -> Result<T, ConverterError> {
        self.map_err(|e| {
            let err: ConverterError = e.into();
            match err {
                ConverterError::Config(s) => ConverterError::Config(format!("{}: {}", msg, s)),
                ConverterError::MalformedInput { path, reason } => {
                    ConverterError::MalformedInput {
                        path,
                        reason: format!("{}: {}", msg, reason),
                    }
                }
                ConverterError::Io(e) => ConverterError::Config(format!("{}: {}", msg, e)),
                other => other,
            }
        })
    }
}
