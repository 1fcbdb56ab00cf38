mod types;

pub use types::{Button, EventKind, InputEvent, Timestamp};
