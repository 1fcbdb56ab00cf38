//! Event-to-row conversion
//!
//! Every event of every capture file goes through [`process_event`] with a
//! single [`CursorState`] that lives for the whole run. Rows go to the table
//! and to a [`RowObserver`].

use crate::error::ConverterError;
use crate::events::{Button, EventKind, InputEvent};
use crate::scanner::{list_event_files, ScanOrder};
use crate::table::TableWriter;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

mod observer;
mod row;
mod state;

pub use observer::{NoopObserver, RowObserver, TraceObserver};
pub use row::{ButtonLabel, Row, RowState, HEADER};
pub use state::CursorState;

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Event files read
    pub files: usize,
    /// Events found across all files
    pub events: usize,
    /// Rows written (header excluded)
    pub rows: usize,
    /// Events with an unrecognized type
    pub skipped: usize,
}

/// Map a captured button to its table label
///
/// Unknown buttons get `ButtonLabel::Unknown` rather than failing the run.
pub fn map_button(button: &Button) -> ButtonLabel {
    match button {
        Button::Left => ButtonLabel::Left,
        Button::Right => ButtonLabel::Right,
        Button::Middle => ButtonLabel::Scroll,
        Button::Unknown(name) => {
            warn!(button = %name, "Unrecognized mouse button");
            ButtonLabel::Unknown
        }
    }
}

/// Convert one event, updating `state`
///
/// Returns `None` for event types that produce no row; `state` is then left
/// untouched.
pub fn process_event(event: &InputEvent, state: &mut CursorState) -> Option<Row> {
    let ts = event.timestamp;
    match &event.kind {
        EventKind::MouseMove { x, y } => {
            // `as` truncates toward zero
            let (x, y) = (*x as i64, *y as i64);
            state.move_to(x, y);
            let label = if state.is_pressed {
                RowState::Drag
            } else {
                RowState::Move
            };
            Some(Row::new(ts, ButtonLabel::NoButton, label, x, y))
        }
        EventKind::ButtonPress(button) => {
            state.press();
            Some(Row::new(
                ts,
                map_button(button),
                RowState::Pressed,
                state.last_x,
                state.last_y,
            ))
        }
        EventKind::ButtonRelease(button) => {
            state.release();
            Some(Row::new(
                ts,
                map_button(button),
                RowState::Released,
                state.last_x,
                state.last_y,
            ))
        }
        EventKind::Unrecognized(_) => {
            debug!(event_type = %event.kind.name(), timestamp = ts, "Skipping event");
            None
        }
    }
}

/// Read one capture file: either a single event or an array of events
pub fn load_events(path: &Path) -> Result<Vec<InputEvent>, ConverterError> {
    let content = fs::read(path).map_err(|source| ConverterError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // Parsed from bytes so invalid UTF-8 is reported as bad JSON
    let value: Value = serde_json::from_slice(&content).map_err(|source| ConverterError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ConverterError::MalformedInput {
                path: path.to_path_buf(),
                reason: format!("event {}: {}", index, e),
            })
        })
        .collect()
}

/// Run a batch of events through the converter, writing each row
pub fn convert_events<W: Write>(
    events: &[InputEvent],
    state: &mut CursorState,
    table: &mut TableWriter<W>,
    observer: &mut dyn RowObserver,
    summary: &mut ConversionSummary,
) -> Result<(), ConverterError> {
    for event in events {
        summary.events += 1;
        match process_event(event, state) {
            Some(row) => {
                table.write_row(&row)?;
                observer.on_row(&row);
                summary.rows += 1;
            }
            None => summary.skipped += 1,
        }
    }
    Ok(())
}

/// Convert every capture file under `input_dir` into the table at `output_path`
///
/// The directory is listed before the output is created, so a missing input
/// directory leaves no output behind.
pub fn convert_directory(
    input_dir: &Path,
    output_path: &Path,
    order: ScanOrder,
    observer: &mut dyn RowObserver,
) -> Result<ConversionSummary, ConverterError> {
    let files = list_event_files(input_dir, order)?;
    info!(
        input = %input_dir.display(),
        output = %output_path.display(),
        files = files.len(),
        "Starting conversion"
    );

    let mut table = TableWriter::create(output_path)?;
    table.write_header()?;

    let mut state = CursorState::new();
    let mut summary = ConversionSummary::default();

    for path in &files {
        let events = load_events(path)?;
        debug!(file = %path.display(), events = events.len(), "Converting file");
        convert_events(&events, &mut state, &mut table, observer, &mut summary)?;
        summary.files += 1;
    }

    table.finish()?;

    info!(
        files = summary.files,
        rows = summary.rows,
        skipped = summary.skipped,
        "Conversion finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> InputEvent {
        serde_json::from_value(value).unwrap()
    }

    fn mouse_move(ts: i64, x: f64, y: f64) -> InputEvent {
        event(json!({"time": {"secs_since_epoch": ts}, "event_type": {"MouseMove": {"x": x, "y": y}}}))
    }

    fn press(ts: i64, button: &str) -> InputEvent {
        event(json!({"time": {"secs_since_epoch": ts}, "event_type": {"ButtonPress": button}}))
    }

    fn release(ts: i64, button: &str) -> InputEvent {
        event(json!({"time": {"secs_since_epoch": ts}, "event_type": {"ButtonRelease": button}}))
    }

    #[test]
    fn test_map_button() {
        assert_eq!(map_button(&Button::Left), ButtonLabel::Left);
        assert_eq!(map_button(&Button::Right), ButtonLabel::Right);
        assert_eq!(map_button(&Button::Middle), ButtonLabel::Scroll);
        assert_eq!(
            map_button(&Button::Unknown("Side".to_string())),
            ButtonLabel::Unknown
        );
    }

    #[test]
    fn test_move_truncates_coordinates() {
        let mut state = CursorState::new();
        let row = process_event(&mouse_move(1, 120.9, -45.7), &mut state).unwrap();

        assert_eq!(row.to_string(), "1,1,NoButton,Move,120,-45");
        assert_eq!((state.last_x, state.last_y), (120, -45));
    }

    #[test]
    fn test_press_before_any_move_uses_origin() {
        let mut state = CursorState::new();
        let row = process_event(&press(5, "Middle"), &mut state).unwrap();

        assert_eq!(row.to_string(), "5,5,Scroll,Pressed,0,0");
        assert!(state.is_pressed);
    }

    #[test]
    fn test_drag_between_press_and_release() {
        let mut state = CursorState::new();
        let rows: Vec<String> = [
            mouse_move(1, 10.0, 10.0),
            press(2, "Left"),
            mouse_move(3, 20.0, 30.0),
            mouse_move(4, 25.0, 35.0),
            release(5, "Left"),
            mouse_move(6, 40.0, 40.0),
        ]
        .iter()
        .filter_map(|e| process_event(e, &mut state))
        .map(|r| r.to_string())
        .collect();

        assert_eq!(
            rows,
            vec![
                "1,1,NoButton,Move,10,10",
                "2,2,Left,Pressed,10,10",
                "3,3,NoButton,Drag,20,30",
                "4,4,NoButton,Drag,25,35",
                "5,5,Left,Released,25,35",
                "6,6,NoButton,Move,40,40",
            ]
        );
    }

    #[test]
    fn test_unrecognized_event_leaves_state_alone() {
        let mut state = CursorState {
            last_x: 3,
            last_y: 4,
            is_pressed: true,
        };
        let wheel = event(json!({
            "time": {"secs_since_epoch": 9},
            "event_type": {"Wheel": {"delta_x": 0, "delta_y": 1}}
        }));

        assert!(process_event(&wheel, &mut state).is_none());
        assert_eq!(
            state,
            CursorState {
                last_x: 3,
                last_y: 4,
                is_pressed: true
            }
        );
    }

    #[test]
    fn test_convert_events_counts_and_observes() {
        let events = vec![
            mouse_move(100, 5.0, 7.0),
            event(json!({"time": {"secs_since_epoch": 100}, "event_type": {"KeyPress": "KeyA"}})),
            press(101, "Right"),
        ];
        let mut state = CursorState::new();
        let mut table = TableWriter::with_path(Vec::new(), Path::new("memory"));
        let mut summary = ConversionSummary::default();
        let mut seen = Vec::new();
        let mut observer = |row: &Row| seen.push(row.clone());

        convert_events(&events, &mut state, &mut table, &mut observer, &mut summary).unwrap();

        assert_eq!(
            summary,
            ConversionSummary {
                files: 0,
                events: 3,
                rows: 2,
                skipped: 1
            }
        );
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].button, ButtonLabel::Right);
    }

    #[test]
    fn test_load_events_single_object_and_array() {
        let temp_dir = tempfile::tempdir().unwrap();
        let single = temp_dir.path().join("single.json");
        fs::write(
            &single,
            r#"{"time":{"secs_since_epoch":1},"event_type":{"Wheel":{"delta_x":0,"delta_y":1}}}"#,
        )
        .unwrap();
        let array = temp_dir.path().join("array.json");
        fs::write(
            &array,
            r#"[{"time":{"secs_since_epoch":1},"event_type":{"ButtonPress":"Left"}},
                {"time":{"secs_since_epoch":2},"event_type":{"ButtonRelease":"Left"}}]"#,
        )
        .unwrap();

        assert_eq!(load_events(&single).unwrap().len(), 1);
        assert_eq!(load_events(&array).unwrap().len(), 2);
    }

    #[test]
    fn test_load_events_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(matches!(
            load_events(&broken),
            Err(ConverterError::Json { .. })
        ));

        let bad_shape = temp_dir.path().join("bad.json");
        fs::write(
            &bad_shape,
            r#"[{"time":{"secs_since_epoch":1},"event_type":{"MouseMove":{"y":2}}}]"#,
        )
        .unwrap();
        match load_events(&bad_shape) {
            Err(ConverterError::MalformedInput { reason, .. }) => {
                assert!(reason.starts_with("event 0:"), "{}", reason)
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_load_events_invalid_utf8_is_json_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, [0xff, 0xfe]).unwrap();

        match load_events(&path) {
            Err(ConverterError::Json { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Json error, got {:?}", other),
        }
    }
}
