//! API Gateway - public HTTP API for the StockWiz services.

use clap::{Parser, Subcommand};

use common::BoxError;
use gateway_lib::config::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "API Gateway for the product and inventory services")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "GATEWAY_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    common::telemetry::init_tracing("info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            // Upstream URLs come from PRODUCT_SERVICE_URL / INVENTORY_SERVICE_URL
            gateway_lib::run_standalone(&host, port).await?;
        }
    }

    Ok(())
}
