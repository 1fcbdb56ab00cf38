use serde::Deserialize;
use serde_json::Value;

/// Seconds since the Unix epoch as recorded by the capture tool
pub type Timestamp = i64;

/// Recorded input event
///
/// Capture files hold the serde form of a hooked input event:
/// `{"time": {"secs_since_epoch": .., "nanos_since_epoch": ..}, "event_type": {..}}`.
/// Only the whole seconds are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub timestamp: Timestamp,
    pub kind: EventKind,
}

/// Event payload, decided by the key present in `event_type`
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    MouseMove { x: f64, y: f64 },
    ButtonPress(Button),
    ButtonRelease(Button),
    /// Any other event type (wheel, keyboard, ...); carries the key name
    Unrecognized(String),
}

/// Mouse button as written by the capture tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
    /// Anything else, e.g. `{"Unknown": 4}` for extra mouse buttons
    Unknown(String),
}

#[derive(Debug, Deserialize)]
struct MousePosition {
    x: f64,
    y: f64,
}

impl Button {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => match name.as_str() {
                "Left" => Button::Left,
                "Right" => Button::Right,
                "Middle" => Button::Middle,
                _ => Button::Unknown(name.clone()),
            },
            other => Button::Unknown(other.to_string()),
        }
    }
}

impl EventKind {
    /// Short name used in log output
    pub fn name(&self) -> &str {
        match self {
            EventKind::MouseMove { .. } => "MouseMove",
            EventKind::ButtonPress(_) => "ButtonPress",
            EventKind::ButtonRelease(_) => "ButtonRelease",
            EventKind::Unrecognized(name) => name,
        }
    }
}

// Custom deserializer: the timestamp is read first, then the event type keys
// are checked in MouseMove, ButtonPress, ButtonRelease order.
impl<'de> Deserialize<'de> for InputEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(D::Error::custom(format!(
                "expected an event object, found {}",
                value
            )));
        }

        let timestamp = value
            .get("time")
            .ok_or_else(|| D::Error::missing_field("time"))?
            .get("secs_since_epoch")
            .ok_or_else(|| D::Error::missing_field("secs_since_epoch"))?
            .as_i64()
            .ok_or_else(|| D::Error::custom("secs_since_epoch is not an integer"))?;

        let event_type = value
            .get("event_type")
            .ok_or_else(|| D::Error::missing_field("event_type"))?
            .as_object()
            .ok_or_else(|| D::Error::custom("event_type is not an object"))?;

        let kind = if let Some(payload) = event_type.get("MouseMove") {
            let position: MousePosition =
                serde_json::from_value(payload.clone()).map_err(|e| {
                    D::Error::custom(format!("invalid MouseMove payload: {}", e))
                })?;
            EventKind::MouseMove {
                x: position.x,
                y: position.y,
            }
        } else if let Some(button) = event_type.get("ButtonPress") {
            EventKind::ButtonPress(Button::from_value(button))
        } else if let Some(button) = event_type.get("ButtonRelease") {
            EventKind::ButtonRelease(Button::from_value(button))
        } else {
            let name = event_type
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| "<empty>".to_string());
            EventKind::Unrecognized(name)
        };

        Ok(InputEvent { timestamp, kind })
    }
}
