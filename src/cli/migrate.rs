use crate::config::{init_database, migrate_database};

/// Run database migrations
///
/// Connects and migrates without building the full AppData.
pub async fn run_migrations(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(database_url).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
