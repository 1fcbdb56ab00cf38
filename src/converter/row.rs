use crate::events::Timestamp;
use std::fmt;

/// Header labels, in column order
pub const HEADER: [&str; 6] = [
    "record timestamp",
    "client timestamp",
    "button",
    "state",
    "x",
    "y",
];

/// Button column value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    NoButton,
    Left,
    Right,
    Scroll,
    Unknown,
}

impl ButtonLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonLabel::NoButton => "NoButton",
            ButtonLabel::Left => "Left",
            ButtonLabel::Right => "Right",
            ButtonLabel::Scroll => "Scroll",
            ButtonLabel::Unknown => "Unknown",
        }
    }
}

/// State column value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Move,
    Drag,
    Pressed,
    Released,
}

impl RowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowState::Move => "Move",
            RowState::Drag => "Drag",
            RowState::Pressed => "Pressed",
            RowState::Released => "Released",
        }
    }
}

/// One output record, one per converted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub record_timestamp: Timestamp,
    pub client_timestamp: Timestamp,
    pub button: ButtonLabel,
    pub state: RowState,
    pub x: i64,
    pub y: i64,
}

impl Row {
    /// Both timestamp columns carry the event's single timestamp.
    pub fn new(timestamp: Timestamp, button: ButtonLabel, state: RowState, x: i64, y: i64) -> Self {
        Self {
            record_timestamp: timestamp,
            client_timestamp: timestamp,
            button,
            state,
            x,
            y,
        }
    }

    pub fn fields(&self) -> [String; 6] {
        [
            self.record_timestamp.to_string(),
            self.client_timestamp.to_string(),
            self.button.as_str().to_string(),
            self.state.as_str().to_string(),
            self.x.to_string(),
            self.y.to_string(),
        ]
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(","))
    }
}
