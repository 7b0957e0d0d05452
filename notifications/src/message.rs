use serde::Serialize;
use serde_json::Value;

/// Trait for getting the wire event type name
pub trait EventType {
    fn event_type(&self) -> &'static str;
}

/// Events pushed to connected admin dashboards. Serializes to the wire shape
/// `{"type": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A new inquiry was submitted; `data` is the serialized inquiry view.
    #[serde(rename = "new_inquiry")]
    NewInquiry(Value),
}

impl EventType for Event {
    fn event_type(&self) -> &'static str {
        match self {
            Event::NewInquiry(_) => "new_inquiry",
        }
    }
}
