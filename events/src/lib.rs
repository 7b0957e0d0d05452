//! Event system infrastructure for the delivery network backend.
//!
//! This crate provides the event seam that decouples request handling from
//! infrastructure side effects (like pushing live notifications to admin
//! dashboards).
//!
//! # Architecture
//!
//! - **DomainEvent**: Enum representing business events in the system
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on internal crates, avoiding circular
//! dependencies. Entity data is carried as serialized JSON values.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Domain events that represent business-level changes in the system.
/// These events are emitted after the corresponding operation has already
/// been persisted; handlers only perform side effects.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// Emitted after a new inquiry has been successfully inserted.
    /// Triggers the live `new_inquiry` notification to connected admin
    /// dashboards. The inquiry is carried as its externally-serialized view.
    InquiryCreated { inquiry: Value },
}

/// Trait for handling domain events.
/// Implementations perform side effects like sending notifications or
/// logging; they must absorb their own failures.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

/// Publishes domain events to registered handlers.
/// Handlers are called sequentially in registration order; a handler's
/// outcome never propagates back to the publishing request.
#[derive(Clone, Default)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers.
    pub async fn publish(&self, event: DomainEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}
