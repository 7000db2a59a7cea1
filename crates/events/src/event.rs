//! Event envelope sent to the orchestrator.

use serde::{Deserialize, Serialize};

/// A named event with an arbitrary JSON payload.
///
/// Built with [`JobEvent::new`] and [`with_data`](JobEvent::with_data); this
/// layer never assigns an id, so the orchestrator treats every send as a
/// distinct event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    /// Slash-separated event name, e.g. `"test/hello.wordl"`.
    pub name: String,

    /// Event-specific payload. Defaults to an empty object.
    pub data: serde_json::Value,
}

impl JobEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: serde_json::Value::Object(Default::default()),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// The orchestrator's answer to a send: the ids it assigned to the accepted
/// events. Receiving one means "accepted for delivery", nothing more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendAck {
    #[serde(default)]
    pub ids: Vec<String>,
}
