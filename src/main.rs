use events::EventPublisher;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use notifications::{Manager, NotificationEventHandler};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting delivery network API [{}]...", config.database_url());

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let notification_manager = Arc::new(Manager::new());
    let event_publisher = EventPublisher::new().with_handler(Arc::new(
        NotificationEventHandler::new(notification_manager.clone()),
    ));

    let app_state = web::AppState::new(config, &db, event_publisher, notification_manager);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
