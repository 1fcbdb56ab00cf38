use crate::config::DEFAULT_LOG_LEVEL;
use crate::error::ConverterError;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, Once};
use tracing_subscriber::{
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

static LOGGER_INITIALIZED: Once = Once::new();

// Keep the guard alive for the lifetime of the program
static FILE_APPENDER_GUARD: LazyLock<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> =
    LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

/// Split a log file path into the directory and file name the appender wants
fn split_log_path(path: &Path) -> Result<(PathBuf, String), ConverterError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConverterError::Config(format!("Invalid log file path: {}", path.display())))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(options: &LoggingOptions) -> Result<(), ConverterError> {
    let file_target = match &options.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)?;
            Some((dir, file_name))
        }
        None => None,
    };

    LOGGER_INITIALIZED.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&options.level));

        // Console output - compact format
        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_filter(env_filter.clone());

        let file_layer = file_target.map(|(dir, file_name)| {
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            if let Ok(mut guard_mutex) = FILE_APPENDER_GUARD.lock() {
                *guard_mutex = Some(guard);
            }

            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter)
        });

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .init();
    });

    Ok(())
}

/// Flush the file writer, if any; call before exiting
pub fn shutdown_logging() {
    if let Ok(mut guard_mutex) = FILE_APPENDER_GUARD.lock() {
        guard_mutex.take();
    }
}
