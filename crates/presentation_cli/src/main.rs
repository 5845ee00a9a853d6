//! Navitia CLI
//!
//! Command-line interface for querying a Navitia API.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use domain::entities::Collection;
use domain::value_objects::datetime::parse_date_time;
use domain::value_objects::{Coordinates, Id};
use integration_navitia::{
    CancellationToken, ExploreRequest, JourneyRequest, NavitiaConfig, PlacesRequest,
    RegionRequest, Session, TransitApi, locate_region,
};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Navitia CLI
#[derive(Parser)]
#[command(name = "navitia-cli")]
#[command(author, version, about = "Navitia public transport API CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (TOML); NAVITIA_* environment variables override it
    #[arg(short, long, default_value = "navitia.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable and accepts the key
    Health,

    /// List the regions covered by the API
    Regions {
        /// Maximum number of regions
        #[arg(long, default_value_t = 0)]
        count: u32,

        /// Do not request region shapes
        #[arg(long)]
        no_geo: bool,
    },

    /// Show one region
    Region {
        /// Region identifier, e.g. fr-idf
        id: String,
    },

    /// Find the region covering a position
    Locate {
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },

    /// Compute journeys between two places
    ///
    /// Places are identifiers or "lon;lat" positions.
    /// Example: navitia-cli journeys --from "2.3749;48.8467" --to stop_area:OIF:SA:8768600
    Journeys {
        /// Starting place
        #[arg(long)]
        from: String,

        /// Destination
        #[arg(long)]
        to: String,

        /// Restrict the computation to one region
        #[arg(short, long)]
        region: Option<String>,

        /// Date and time, formatted YYYYMMDDTHHMMSS
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,

        /// Treat --at as the latest arrival time
        #[arg(long, requires = "at")]
        arrive_by: bool,

        /// Number of journeys to compute
        #[arg(long, default_value_t = 0)]
        count: u32,
    },

    /// Search places by name
    Places {
        /// Search text
        query: String,

        /// Restrict the search to one region
        #[arg(short, long)]
        region: Option<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 0)]
        count: u32,
    },

    /// List the lines serving a stop area
    Lines {
        /// Region identifier
        #[arg(short, long)]
        region: String,

        /// Stop area identifier
        stop_area: String,

        /// Lines per page
        #[arg(long, default_value_t = 0)]
        count: u32,
    },
}

fn parse_at(value: &str) -> Result<NaiveDateTime, String> {
    parse_date_time(value).map_err(|e| format!("expected YYYYMMDDTHHMMSS: {e}"))
}

const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load the client configuration from an optional file and the environment
fn load_config(path: &Path) -> anyhow::Result<NavitiaConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        // e.g. NAVITIA_API_KEY, NAVITIA_BASE_URL
        .add_source(config::Environment::with_prefix("NAVITIA").try_parsing(true))
        .build()
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;

    settings
        .try_deserialize()
        .context("invalid Navitia configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&cli.config)?;
    debug!(?config, "Configuration loaded");

    let token = CancellationToken::new();
    let session = Session::new(&config)?.with_cancellation(token.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            token.cancel();
        }
    });

    match cli.command {
        Commands::Health => {
            if session.is_healthy().await {
                println!("✅ Healthy ({})", session.base_url());
            } else {
                println!("❌ Unhealthy ({})", session.base_url());
                std::process::exit(1);
            }
        },

        Commands::Regions { count, no_geo } => {
            let request = RegionRequest {
                count,
                geo: !no_geo,
            };
            let results = session.regions(&request).await?;
            println!("🗺️  {} region(s)", results.len());
            println!("{results}");
        },

        Commands::Region { id } => {
            let results = session.region_by_id(&Id::new(id)).await?;
            println!("{results}");
        },

        Commands::Locate { lon, lat } => {
            let coords = Coordinates::new(lon, lat)?;
            let region = locate_region(&session, &coords).await?;
            println!("📍 {coords} is covered by:");
            println!("{region}");
        },

        Commands::Journeys {
            from,
            to,
            region,
            at,
            arrive_by,
            count,
        } => {
            let mut request = JourneyRequest::between(&from.as_str(), &to.as_str());
            request.count = count;
            if let Some(at) = at {
                request = if arrive_by {
                    request.arriving_by(at)
                } else {
                    request.departing_at(at)
                };
            }

            let results = match region {
                Some(region) => session.scope(Id::new(region)).journeys(&request).await?,
                None => session.journeys(&request).await?,
            };

            if results.journeys.is_empty() {
                println!("No journey found");
            } else {
                println!("{results}");
                if let Some(fastest) = results.fastest() {
                    println!("⏱️  Fastest: {}", fastest.format_summary());
                }
            }
        },

        Commands::Places {
            query,
            region,
            count,
        } => {
            let request = PlacesRequest {
                count,
                ..PlacesRequest::new(query)
            };
            let results = match region {
                Some(region) => session.scope(Id::new(region)).places(&request).await?,
                None => session.places(&request).await?,
            };

            for place in results.into_places()? {
                println!("{} ({})", place.name(), place.kind());
            }
        },

        Commands::Lines {
            region,
            stop_area,
            count,
        } => {
            let stop_area = session
                .scope(Id::new(region))
                .object(Collection::StopAreas, Id::new(stop_area));

            let mut request = ExploreRequest {
                count,
                ..ExploreRequest::default()
            };
            loop {
                let results = stop_area.explore(Collection::Lines, &request).await?;
                for line in &results.objects {
                    println!("{line}");
                }
                match request.next_page(&results.paging) {
                    Some(next) => request = next,
                    None => break,
                }
            }
        },
    }

    Ok(())
}
