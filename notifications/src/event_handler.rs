use crate::message::Event;
use crate::Manager;
use async_trait::async_trait;
use events::{DomainEvent, EventHandler};
use log::*;
use std::sync::Arc;

/// Converts domain events into admin dashboard notifications.
///
/// Invoked by the `events::EventPublisher` after the triggering operation has
/// already been persisted; nothing that happens here can affect the outcome
/// of that operation.
pub struct NotificationEventHandler {
    manager: Arc<Manager>,
}

impl NotificationEventHandler {
    pub fn new(manager: Arc<Manager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EventHandler for NotificationEventHandler {
    async fn handle(&self, event: &DomainEvent) {
        match event {
            DomainEvent::InquiryCreated { inquiry } => {
                debug!("Handling InquiryCreated event");
                self.manager.broadcast(Event::NewInquiry(inquiry.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ws::Message;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn inquiry_created_becomes_a_new_inquiry_frame() {
        let manager = Arc::new(Manager::new());
        let handler = NotificationEventHandler::new(manager.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        manager.register_connection(tx);

        handler
            .handle(&DomainEvent::InquiryCreated {
                inquiry: json!({"id": "abc", "name": "A B"}),
            })
            .await;

        let frame = rx.try_recv().unwrap();
        let Message::Text(payload) = frame else {
            panic!("expected a text frame");
        };
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["type"], "new_inquiry");
        assert_eq!(value["data"]["id"], "abc");
    }
}
