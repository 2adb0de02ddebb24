//! Inventory Service - HTTP server for stock levels.

use clap::{Parser, Subcommand};

use common::BoxError;
use inventory_service_lib::config::DEFAULT_PORT;
use inventory_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "inventory-service")]
#[command(about = "Inventory management microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "INVENTORY_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "INVENTORY_SERVICE_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop the inventory tables and run all migrations again
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    common::telemetry::init_tracing("info,sqlx=warn");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            inventory_service_lib::run_embedded(&host, port).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            inventory_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
