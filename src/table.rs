//! Comma-separated table output.

use crate::converter::{Row, HEADER};
use crate::error::ConverterError;
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[cfg(windows)]
fn terminator() -> Terminator {
    Terminator::CRLF
}

#[cfg(not(windows))]
fn terminator() -> Terminator {
    Terminator::Any(b'\n')
}

/// Row-at-a-time table writer
pub struct TableWriter<W: Write> {
    inner: csv::Writer<W>,
    path: PathBuf,
}

impl TableWriter<File> {
    /// Create (or truncate) the table at `path`
    pub fn create(path: &Path) -> Result<Self, ConverterError> {
        let file = File::create(path).map_err(|source| ConverterError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_path(file, path))
    }
}

impl<W: Write> TableWriter<W> {
    /// Wrap an arbitrary writer; `path` is only used in error messages
    pub fn with_path(inner: W, path: &Path) -> Self {
        let inner = WriterBuilder::new()
            .terminator(terminator())
            .from_writer(inner);
        Self {
            inner,
            path: path.to_path_buf(),
        }
    }

    pub fn write_header(&mut self) -> Result<(), ConverterError> {
        self.inner
            .write_record(HEADER)
            .map_err(|e| self.write_failure(e.into()))
    }

    pub fn write_row(&mut self, row: &Row) -> Result<(), ConverterError> {
        self.inner
            .write_record(row.fields())
            .map_err(|e| self.write_failure(e.into()))
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, ConverterError> {
        let path = self.path;
        self.inner
            .into_inner()
            .map_err(|e| ConverterError::OutputWriteFailure {
                path,
                source: io::Error::new(e.error().kind(), e.error().to_string()),
            })
    }

    fn write_failure(&self, source: io::Error) -> ConverterError {
        ConverterError::OutputWriteFailure {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{ButtonLabel, RowState};

    #[test]
    fn test_header_and_rows() {
        let mut table = TableWriter::with_path(Vec::new(), Path::new("memory"));
        table.write_header().unwrap();
        table
            .write_row(&Row::new(100, ButtonLabel::NoButton, RowState::Move, 5, 7))
            .unwrap();

        let bytes = table.finish().unwrap();
        let expected = format!(
            "record timestamp,client timestamp,button,state,x,y{nl}100,100,NoButton,Move,5,7{nl}",
            nl = LINE_ENDING
        );
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("out.csv");

        match TableWriter::create(&path) {
            Err(ConverterError::OutputWriteFailure { path: failed, .. }) => {
                assert_eq!(failed, path)
            }
            other => panic!("expected OutputWriteFailure, got {:?}", other.map(|_| ())),
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_error_is_output_failure() {
        let mut table = TableWriter::with_path(BrokenPipe, Path::new("pipe.csv"));
        // The csv writer buffers, so the failure may surface on either call
        let result = table.write_header().and_then(|_| table.finish().map(|_| ()));

        match result {
            Err(ConverterError::OutputWriteFailure { path, source }) => {
                assert_eq!(path, PathBuf::from("pipe.csv"));
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("expected OutputWriteFailure, got {:?}", other),
        }
    }
}
