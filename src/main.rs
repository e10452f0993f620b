use clap::{Parser, Subcommand};
use co2_dashboard::{config, data, server};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and serve the dashboard API
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Load the dataset and print what survived cleaning
    Inspect {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            // A malformed source is fatal here, before any UI is served.
            let store = data::DataStore::load(&app_config.input)?;

            server::start_server(app_config, store).await?;
        }
        Commands::Inspect { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let store = data::DataStore::load(&app_config.input)?;

            println!("Records:   {}", store.records.len());
            println!("Countries: {}", store.countries.len());
            println!(
                "Years:     {} ({}-{})",
                store.years.len(),
                store.years.first().unwrap_or(&store.latest_year),
                store.latest_year
            );
            println!("Latest:    {}", store.latest_year);
        }
    }

    Ok(())
}
