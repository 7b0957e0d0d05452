//! Live admin notification fan-out.
//!
//! This crate owns the shared set of connected admin dashboard channels and
//! the logic to broadcast events over it safely under concurrent access.
//!
//! # Architecture
//!
//! - **Connection registry**: a dashmap of server-generated `ConnectionId` to
//!   the sending half of each live WebSocket channel. `register`, `unregister`
//!   and `broadcast` are safe under arbitrary interleaving; removal of failed
//!   connections happens after iteration, never mid-iteration.
//! - **Best-effort delivery**: a slow or half-dead admin connection never
//!   blocks or poisons delivery to the others. Failed connections are swept
//!   lazily at broadcast time; their socket tasks also unregister themselves
//!   on disconnect, and the double removal is a harmless no-op.
//! - **Ephemeral messages**: an admin who is offline when an event fires
//!   simply misses it and sees fresh data on the next page load. Nothing is
//!   persisted across restarts.
//! - **Typed events**: wire events are a serde-tagged enum serializing to
//!   `{"type": ..., "data": ...}`.
//!
//! # Message flow
//!
//! 1. An admin dashboard connects to the notification WebSocket endpoint
//! 2. The web layer registers the connection's sender in the registry
//! 3. When an inquiry is created, the controller publishes
//!    `DomainEvent::InquiryCreated` through the `events::EventPublisher`
//! 4. [`NotificationEventHandler`] converts it to a wire event and calls
//!    [`Manager::broadcast`]
//! 5. Each connection's socket task forwards the frame to its client
//!
//! # Modules
//!
//! - `connection`: `ConnectionRegistry` and type-safe `ConnectionId`
//! - `manager`: high-level facade (delegates to `ConnectionRegistry`)
//! - `message`: typed wire event definitions
//! - `event_handler`: bridge from `events::DomainEvent` to a broadcast

pub mod connection;
pub mod event_handler;
pub mod manager;
pub mod message;

pub use event_handler::NotificationEventHandler;
pub use manager::Manager;
