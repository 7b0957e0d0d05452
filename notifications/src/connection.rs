use axum::extract::ws::Message;
use dashmap::DashMap;
use log::*;
use tokio::sync::mpsc::UnboundedSender;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared set of live admin notification channels.
///
/// Each entry maps a connection id to the sending half of that connection's
/// outbound channel; the socket task owns the receiving half and forwards
/// frames to the client. All three operations are safe under concurrent
/// access from connect/disconnect handlers and broadcasting request handlers.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, UnboundedSender<Message>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection - O(1). Every connect produces a distinct
    /// entry; there is no dedup.
    pub fn register(&self, sender: UnboundedSender<Message>) -> ConnectionId {
        let connection_id = ConnectionId::new();
        self.connections.insert(connection_id.clone(), sender);
        connection_id
    }

    /// Unregister a connection - O(1). A no-op when the connection is absent:
    /// a connection may be removed both by its own socket task and by a
    /// failed-broadcast sweep.
    pub fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Broadcast a message to all connections, best effort per connection.
    ///
    /// Failed sends are collected during iteration and the dead connections
    /// are removed afterward, so the map is never mutated while it is being
    /// iterated. One connection's failure never affects delivery to the rest;
    /// broadcasting to an empty registry is fine. Returns the number of
    /// successful sends.
    pub fn broadcast(&self, message: Message) -> usize {
        let mut delivered = 0;
        let mut failed: Vec<ConnectionId> = Vec::new();

        for entry in self.connections.iter() {
            if entry.value().send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                failed.push(entry.key().clone());
            }
        }

        for connection_id in failed {
            warn!(
                "Failed to send broadcast to connection {}; removing it",
                connection_id.as_str()
            );
            self.connections.remove(&connection_id);
        }

        delivered
    }
}
