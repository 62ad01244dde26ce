// CLI module for the server and administrative operations

pub mod create_admin;
pub mod migrate;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// MC Despachante backend
#[derive(Parser, Debug)]
#[command(name = "despachante-backend")]
#[command(about = "MC Despachante backend server and admin CLI", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create an admin profile
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        nome: String,

        #[arg(long)]
        telefone: Option<String>,

        /// Generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// Execute an administrative command
///
/// `serve` and `migrate` are handled by main before AppData exists.
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::CreateAdmin {
            email,
            nome,
            telefone,
            password,
        } => {
            create_admin::create_admin(app_data, &email, &nome, telefone, password).await?;
        }
        Commands::Serve | Commands::Migrate => {
            tracing::warn!("{:?} is not an administrative command", command);
        }
    }

    Ok(())
}
