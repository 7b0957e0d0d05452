//! WebSocket HTTP handler for the web layer.
//!
//! This module contains only the Axum handler for the admin notification
//! endpoint. The core fan-out infrastructure (Manager, ConnectionRegistry,
//! message types) lives in the `notifications` crate.

pub mod handler;
