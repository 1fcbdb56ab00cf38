use super::Row;
use chrono::DateTime;
use tracing::info;

/// Receives every row the converter emits
///
/// The console trace is one implementation; tests collect rows with a closure.
pub trait RowObserver {
    fn on_row(&mut self, row: &Row);
}

impl<F: FnMut(&Row)> RowObserver for F {
    fn on_row(&mut self, row: &Row) {
        self(row)
    }
}

/// Logs each row as it is written
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceObserver;

impl RowObserver for TraceObserver {
    fn on_row(&mut self, row: &Row) {
        let at = DateTime::from_timestamp(row.record_timestamp, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| row.record_timestamp.to_string());
        info!(at = %at, "{}", row);
    }
}

/// Drops rows; used with `--quiet`
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RowObserver for NoopObserver {
    fn on_row(&mut self, _row: &Row) {}
}
