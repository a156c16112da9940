//! Notifications emitted after successful operations.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Type of every event the keeper emits.
pub const EVENT_TYPE_MESSAGE: &str = "message";

/// Module emitting the event.
pub const ATTRIBUTE_MODULE: &str = "module";
/// What happened.
pub const ATTRIBUTE_ACTION: &str = "action";
/// Account that sent the request.
pub const ATTRIBUTE_CREATOR: &str = "Creator";
/// Id of a created game.
pub const ATTRIBUTE_INDEX: &str = "Index";
/// Red participant.
pub const ATTRIBUTE_RED: &str = "Red";
/// Black participant.
pub const ATTRIBUTE_BLACK: &str = "Black";
/// Id of the game a move was played in.
pub const ATTRIBUTE_ID_VALUE: &str = "IdValue";
/// Column of the captured piece.
pub const ATTRIBUTE_CAPTURED_X: &str = "CapturedX";
/// Row of the captured piece.
pub const ATTRIBUTE_CAPTURED_Y: &str = "CapturedY";
/// Winner after a move.
pub const ATTRIBUTE_WINNER: &str = "Winner";

/// Action of a game creation.
pub const ACTION_NEW_GAME_CREATED: &str = "NewGameCreated";
/// Action of an accepted move.
pub const ACTION_MOVE_PLAYED: &str = "MovePlayed";

/// One key/value pair of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A typed, ordered list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attributes in emission order.
    pub attributes: Vec<Attribute>,
}

impl Event {
    /// Creates a `message` event.
    pub fn message(attributes: Vec<Attribute>) -> Self {
        Self {
            kind: EVENT_TYPE_MESSAGE.to_string(),
            attributes,
        }
    }

    /// Returns the value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

/// Receives events emitted by the keeper.
pub trait EventSink {
    /// Takes one event.
    fn emit(&mut self, event: Event);
}

/// Collects events in memory in emission order.
#[derive(Debug, Clone, Default)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Removes and returns every event received so far.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventManager {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Writes events to the log and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        let action = event.attribute(ATTRIBUTE_ACTION).unwrap_or_default();
        let attributes = event
            .attributes
            .iter()
            .map(|a| format!("{}={}", a.key, a.value))
            .collect::<Vec<_>>()
            .join(" ");
        info!(kind = %event.kind, action, attributes = %attributes, "Event emitted");
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_keeps_order() {
        let mut manager = EventManager::new();
        manager.emit(Event::message(vec![Attribute::new(ATTRIBUTE_ACTION, "first")]));
        manager.emit(Event::message(vec![Attribute::new(ATTRIBUTE_ACTION, "second")]));

        let actions: Vec<_> = manager
            .events()
            .iter()
            .filter_map(|e| e.attribute(ATTRIBUTE_ACTION))
            .collect();
        assert_eq!(actions, vec!["first", "second"]);

        assert_eq!(manager.drain().len(), 2);
        assert!(manager.events().is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let event = Event::message(vec![Attribute::new(ATTRIBUTE_MODULE, "checkers")]);
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["type"], "message");
        assert_eq!(json["attributes"][0]["key"], "module");
    }
}
