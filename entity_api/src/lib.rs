pub use entity::{inquiries, users, Id};

pub mod error;
pub mod inquiry;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Connects to a fresh in-memory SQLite database and applies all migrations.
    /// The pool is pinned to a single connection: each pooled connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub(crate) async fn connect_migrated() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("failed to open in-memory sqlite");
        Migrator::up(&db, None).await.expect("migrations failed");
        db
    }
}
