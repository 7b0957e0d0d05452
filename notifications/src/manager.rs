use crate::connection::{ConnectionId, ConnectionRegistry};
use crate::message::{Event, EventType};
use axum::extract::ws::Message;
use log::*;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// High-level facade over the connection registry: registers channels and
/// serializes typed events into WebSocket frames for broadcast.
#[derive(Default)]
pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Register a new connection and return its unique ID
    pub fn register_connection(&self, sender: UnboundedSender<Message>) -> ConnectionId {
        let connection_id = self.registry.register(sender);
        info!(
            "Registered admin notification connection ({} active)",
            self.connection_count()
        );
        connection_id
    }

    /// Unregister a connection by ID
    pub fn unregister_connection(&self, connection_id: &ConnectionId) {
        self.registry.unregister(connection_id);
        info!(
            "Unregistered admin notification connection ({} active)",
            self.connection_count()
        );
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// Broadcast an event to every connected admin dashboard. Serialization
    /// or per-connection delivery failures are logged and absorbed here; this
    /// never fails as a whole.
    pub fn broadcast(&self, event: Event) {
        let event_type = event.event_type();

        let payload = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize {event_type} notification: {e}");
                return;
            }
        };

        let delivered = self.registry.broadcast(Message::Text(payload));
        debug!("Broadcast {event_type} notification to {delivered} connection(s)");
    }
}
