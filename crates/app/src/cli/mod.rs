use std::io;

use catalog_app::context::AppContext;
use clap::{Parser, Subcommand};

use self::config::{DatabaseConfig, LoggingConfig};

mod config;
mod logging;
mod products;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Catalog CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Products(products::ProductsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = AppContext::from_database_url(&self.database.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        match self.command {
            Commands::Products(command) => {
                products::run(command, context.products.as_ref(), &mut io::stdout()).await
            }
        }
    }
}
