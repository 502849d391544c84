mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod server;

use clap::Parser;
use cli::{Cli, Commands, EstimateArgs};
use config::Config;
use datasources::{NominatimClient, OpenMeteoClient, ReferenceTables};
use error::{HarvestError, Result};
use logic::{default_rainfall_year, Estimator};
use models::EstimateRequest;
use tracing_subscriber::EnvFilter;

type LiveEstimator = Estimator<NominatimClient, OpenMeteoClient, ReferenceTables>;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so report JSON on stdout stays clean
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load(cli.config)?;

    match cli.command {
        Commands::Estimate(args) => run_estimate(&config, &args).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let estimator = build_estimator(&config)?;
            server::serve(estimator, &bind).await
        }
        Commands::Check => run_check(&config),
        Commands::Init => Ok(()),
    }
}

fn build_estimator(config: &Config) -> Result<LiveEstimator> {
    let reference = ReferenceTables::load(&config.reference)?;
    let geocoder = NominatimClient::new(config.geocoding.clone())?;
    let weather = OpenMeteoClient::new(config.weather.clone())?;
    Ok(Estimator::new(geocoder, weather, reference))
}

async fn run_estimate(config: &Config, args: &EstimateArgs) -> Result<()> {
    let request = EstimateRequest::from(args);
    request.validate()?;

    let estimator = build_estimator(config)?;
    let year = args.year.unwrap_or_else(default_rainfall_year);
    let report = estimator.estimate(&request, year).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_check(config: &Config) -> Result<()> {
    println!("Reference tables");
    let tables = ReferenceTables::load(&config.reference).map_err(|e| {
        println!("  FAILED: {}", e);
        e
    })?;
    let (soil, groundwater, classification) = tables.row_counts();
    println!(
        "  soil:           {} districts ({})",
        soil,
        config.reference.soil_table.display()
    );
    println!(
        "  groundwater:    {} districts ({})",
        groundwater,
        config.reference.groundwater_table.display()
    );
    println!(
        "  classification: {} districts ({})",
        classification,
        config.reference.classification_table.display()
    );

    println!("Data sources");
    NominatimClient::new(config.geocoding.clone())?;
    println!(
        "  geocoding: {} (timeout {}s)",
        config.geocoding.base_url, config.geocoding.timeout_secs
    );
    OpenMeteoClient::new(config.weather.clone())?;
    println!(
        "  weather:   {} (timeout {}s)",
        config.weather.base_url, config.weather.timeout_secs
    );

    if soil == 0 || classification == 0 {
        return Err(HarvestError::Config(
            "reference tables loaded but contain no districts".into(),
        ));
    }

    println!("OK");
    Ok(())
}
