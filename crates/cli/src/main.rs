mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use travel_sync_core::{Config, Search};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "travel-sync")]
#[command(about = "Synchronize city places, weather and travel advisories into a graph store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Wait for the store and install the schema if it differs
    Schema,
    /// Load one city and print the report as JSON
    Load {
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Load the built-in city list
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&config, port, host).await,
        Commands::Schema => commands::schema::run(&config).await,
        Commands::Load { city, country, lat, lng } => {
            commands::load::run(&config, Search::new(city, country, lat, lng)).await
        },
        Commands::Seed => commands::load::seed(&config).await,
    }
}
