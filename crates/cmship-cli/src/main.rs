mod estimate;
mod lookup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cmship")]
#[command(about = "Shipping-fee estimates for deliveries within Cameroon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List location suggestions for a partial address
    Suggest {
        /// Location text as a shopper would type it (e.g. "Bonapriso")
        query: String,
    },
    /// Look up a location and quote the delivery fee for one suggestion
    Quote {
        query: String,
        /// 1-based suggestion to quote
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
    /// Quote a delivery to explicit coordinates, no geocoding involved
    Distance {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// City name to check against the fixed-rate table
        #[arg(long)]
        city: Option<String>,
    },
    /// Print the active rate configuration
    Rates,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = cmship_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let estimator = estimate::build_estimator(&config)?;

    match cli.command {
        Commands::Suggest { query } => lookup::run_suggest(&config, &query).await?,
        Commands::Quote { query, pick } => {
            lookup::run_quote(&config, estimator, &query, pick).await?;
        }
        Commands::Distance { lat, lng, city } => {
            estimate::run_distance(&estimator, lat, lng, city.as_deref())?;
        }
        Commands::Rates => estimate::run_rates(&estimator),
    }

    Ok(())
}
