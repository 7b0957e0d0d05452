//! HTTP layer: router, controllers, bearer-token extraction, the admin
//! notification WebSocket endpoint, and the domain-error-to-status mapping.

use events::EventPublisher;
use log::*;
use notifications::Manager;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;

pub(crate) mod controller;
pub(crate) mod error;
pub(crate) mod extractors;
pub(crate) mod params;
pub mod router;
pub(crate) mod ws;

pub use error::{Error, Result};

/// Application state passed into the router. Needs to implement Clone to be
/// able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
    pub event_publisher: EventPublisher,
    pub notification_manager: Arc<Manager>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: &Arc<DatabaseConnection>,
        event_publisher: EventPublisher,
        notification_manager: Arc<Manager>,
    ) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config,
            event_publisher,
            notification_manager,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}

/// Binds the configured interface/port and serves the API until shutdown.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server starting... listening for requests on http://{host}:{port}");

    axum::serve(listener, router::define_routes(app_state)).await
}
