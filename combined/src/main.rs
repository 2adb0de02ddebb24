//! Combined binary for development - runs the gateway and both services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};

use common::database::MigrateAction;
use common::BoxError;

#[derive(Parser)]
#[command(name = "stockwiz")]
#[command(about = "Combined StockWiz binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "8000")]
        gateway_port: u16,
        #[arg(long, default_value = "8001")]
        product_port: u16,
        #[arg(long, default_value = "8002")]
        inventory_port: u16,
    },
    /// Run database migrations for both services
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback the last migration of each service
    Down,
    /// Show migration status
    Status,
    /// Drop the service tables and run all migrations again
    Fresh,
}

impl From<MigrateCommands> for MigrateAction {
    fn from(command: MigrateCommands) -> Self {
        match command {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Status => MigrateAction::Status,
            MigrateCommands::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    common::telemetry::init_tracing("info,sqlx=warn,tower_http=debug");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            product_port,
            inventory_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:           http://{}:{}", host, gateway_port);
            info!("  Product service:   http://{}:{}", host, product_port);
            info!("  Inventory service: http://{}:{}", host, inventory_port);

            let product_host = host.clone();
            let product_handle = tokio::spawn(async move {
                if let Err(e) = product_service_lib::run_embedded(&product_host, product_port).await
                {
                    error!("Product service failed: {}", e);
                }
            });

            let inventory_host = host.clone();
            let inventory_handle = tokio::spawn(async move {
                if let Err(e) =
                    inventory_service_lib::run_embedded(&inventory_host, inventory_port).await
                {
                    error!("Inventory service failed: {}", e);
                }
            });

            // Give both services a moment to migrate and bind
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            // Spawn gateway (depends on both services)
            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(
                    &gateway_host,
                    gateway_port,
                    product_port,
                    inventory_port,
                )
                .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = product_handle => {
                    error!("Product service exited unexpectedly");
                }
                _ = inventory_handle => {
                    error!("Inventory service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            let action = MigrateAction::from(action);
            product_service_lib::run_migrations(action).await?;
            inventory_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
