use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use despachante_backend::api::build_routes;
use despachante_backend::cli::{Cli, Commands, execute_command, migrate::run_migrations};
use despachante_backend::config::{
    LoggingConfig, Settings, SystemEnvironment, init_database, init_logging, migrate_database,
};
use despachante_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env = SystemEnvironment;
    init_logging(&LoggingConfig::from_env_provider(&env))?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    let settings = Settings::from_env_provider(&env)?;
    if command == Commands::Migrate {
        return run_migrations(&settings.database_url).await;
    }

    let db = init_database(&settings.database_url).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::from_env(db, &env)?);

    if command != Commands::Serve {
        return execute_command(command, &app_data).await;
    }

    let bind_address = app_data.settings.bind_address();
    let server_url = format!("http://localhost:{}/api", app_data.settings.port);
    let app = build_routes(app_data.clone(), &server_url);

    tracing::info!("Starting server on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", app_data.settings.port);

    Server::new(TcpListener::bind(bind_address))
        .run(app)
        .await?;

    Ok(())
}
