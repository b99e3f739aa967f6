use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use storefront_core::RegionCatalog;
use tracing_subscriber::EnvFilter;

mod catalog;
mod points;
mod reviews;

use reviews::ReviewsCommands;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront pickup-point and review command line interface")]
struct Cli {
    /// Region catalog YAML; the bundled catalog is used when unset
    #[arg(long, global = true, env = "STOREFRONT_REGIONS_PATH")]
    regions_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List regions, optionally filtered by a search string
    Regions {
        #[arg(long)]
        query: Option<String>,
    },
    /// List the sub-regions of one region
    SubRegions {
        region: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Resolve fulfillment points for a region and sub-region
    Points {
        #[arg(long)]
        region: String,
        #[arg(long)]
        sub_region: String,
    },
    /// Review listing, eligibility, and submission
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<RegionCatalog> {
    let catalog = match path {
        Some(path) => RegionCatalog::load(path)?,
        None => RegionCatalog::bundled()?,
    };
    tracing::debug!(regions = catalog.len(), "region catalog loaded");
    Ok(catalog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("storefront: run with --help to list commands");
        return Ok(());
    };

    // Catalog browsing is offline and needs no API configuration.
    match command {
        Commands::Regions { query } => {
            init_tracing("info")?;
            let catalog = load_catalog(cli.regions_file.as_deref())?;
            catalog::run_regions(&catalog, query.as_deref());
        }
        Commands::SubRegions { region, query } => {
            init_tracing("info")?;
            let catalog = load_catalog(cli.regions_file.as_deref())?;
            catalog::run_sub_regions(&catalog, &region, query.as_deref())?;
        }
        Commands::Points { region, sub_region } => {
            let config = storefront_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let regions_file = cli.regions_file.or_else(|| config.regions_path.clone());
            let catalog = load_catalog(regions_file.as_deref())?;
            let client = storefront_api::CommerceClient::from_config(&config)?;
            points::run_points(&client, catalog, &region, &sub_region).await?;
        }
        Commands::Reviews { command } => {
            let config = storefront_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let client = storefront_api::CommerceClient::from_config(&config)?;
            reviews::run_reviews(&client, &config, command).await?;
        }
    }

    Ok(())
}
