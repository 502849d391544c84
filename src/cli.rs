use crate::models::EstimateRequest;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rainharvest",
    version,
    about = "Rooftop rainwater harvesting feasibility estimator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate feasibility for a district and print the report as JSON
    Estimate(EstimateArgs),
    /// Serve the estimate endpoint over HTTP
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Interactively write a config file
    Init,
    /// Validate config and reference tables
    Check,
}

#[derive(Args)]
pub struct EstimateArgs {
    /// District name to geocode and look up
    pub district: String,

    /// Rooftop catchment area in m²
    #[arg(long, default_value_t = 100.0)]
    pub area: f64,

    /// Number of occupants
    #[arg(long, default_value_t = 1)]
    pub people: u32,

    /// Open space available in m²
    #[arg(long, default_value_t = 5.0)]
    pub open_space: f64,

    /// Roof material (concrete, metal, tile, green, asphalt)
    #[arg(long, default_value = "concrete")]
    pub roof_type: String,

    /// Rainfall year to fetch (defaults to last calendar year)
    #[arg(long)]
    pub year: Option<i32>,
}

impl From<&EstimateArgs> for EstimateRequest {
    fn from(args: &EstimateArgs) -> Self {
        Self {
            district: args.district.clone(),
            rooftop_area_sqm: args.area,
            people: args.people,
            open_space_sqm: args.open_space,
            roof_type: args.roof_type.clone(),
        }
    }
}
