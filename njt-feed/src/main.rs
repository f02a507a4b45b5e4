//! Command-line demo for the NJ Transit feeds.
//!
//! Prints decoded feeds as JSON. Credentials and endpoints come from the
//! environment: `NJT_USERNAME`, `NJT_PASSWORD`, `NJT_BASE_URL`, `NJT_DV_URL`
//! and `NJT_STATION_CACHE`.

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use njt_feed::cache::{CacheConfig, CachedNjtClient};
use njt_feed::departurevision::{self, DepartureVisionClient};
use njt_feed::domain::{Train, TrainId};
use njt_feed::feed::{NjtClient, NjtConfig};
use njt_feed::stations::{StationCache, StationCacheConfig, StationDirectory};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "njt-feed")]
#[command(about = "Query NJ Transit train data feeds", long_about = None)]
struct Cli {
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest position of every active train
    Vehicles {
        /// Poll again every N seconds instead of exiting
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },
    /// Departure board for a station
    Station {
        /// Two-character station code, e.g. NY
        code: String,

        /// Poll again every N seconds instead of exiting
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },
    /// All stations with their aliases
    Stations {
        /// Ignore the disk cache and fetch the list again
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Route, position and stops for one train
    Train {
        /// Train number, e.g. 3843
        id: String,
    },
    /// Departures scraped from the DepartureVision page
    Departures {
        /// Two-character station code, e.g. NY
        code: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("njt_feed=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "request failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Vehicles { watch } => {
            let cached = CachedNjtClient::new(feed_client(cli.timeout)?, &CacheConfig::default());
            let cached = &cached;
            poll(watch, move || async move { print_json(&*cached.vehicle_data().await?) }).await
        }
        Commands::Station { code, watch } => {
            let cached = CachedNjtClient::new(feed_client(cli.timeout)?, &CacheConfig::default());
            let (cached, code) = (&cached, code.as_str());
            poll(watch, move || async move { print_json(&*cached.station_data(code).await?) }).await
        }
        Commands::Stations { refresh } => {
            let cache_path = std::env::var("NJT_STATION_CACHE")
                .map(StationCacheConfig::new)
                .unwrap_or_default();
            let cache = StationCache::new(cache_path);

            let directory = StationDirectory::load(feed_client(cli.timeout)?, Some(cache)).await?;
            if refresh {
                directory.refresh().await?;
            }
            print_json(&directory.all().await)
        }
        Commands::Train { id } => {
            let id = TrainId::normalize(&id)?;
            let client = feed_client(cli.timeout)?;

            let (map, stops) =
                futures::future::try_join(client.train_map(id), client.train_stops(id)).await?;
            print_json(&merge_train(map, stops))
        }
        Commands::Departures { code } => {
            let base_url = std::env::var("NJT_DV_URL")
                .unwrap_or_else(|_| departurevision::DEFAULT_BASE_URL.to_string());
            let client = DepartureVisionClient::new(base_url, timeout)?;
            print_json(&client.departures(&code).await?)
        }
    }
}

/// Build the XML feed client from the environment.
fn feed_client(timeout_secs: u64) -> Result<NjtClient, BoxError> {
    let username = std::env::var("NJT_USERNAME").unwrap_or_else(|_| {
        warn!("NJT_USERNAME not set; API calls will fail");
        String::new()
    });
    let password = std::env::var("NJT_PASSWORD").unwrap_or_else(|_| {
        warn!("NJT_PASSWORD not set; API calls will fail");
        String::new()
    });

    let mut config = NjtConfig::new(username, password).with_timeout(timeout_secs);
    if let Ok(base_url) = std::env::var("NJT_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    Ok(NjtClient::new(config)?)
}

/// The stop list lookup has no route details; take them from the map lookup.
fn merge_train(map: Train, mut stops: Train) -> Train {
    stops.line = map.line;
    stops.direction = map.direction;
    stops.track_circuit = map.track_circuit;
    if stops.position.is_none() {
        stops.position = map.position;
    }
    stops
}

/// Run `fetch` once, or every `watch` seconds until interrupted.
async fn poll<F, Fut>(watch: Option<u64>, mut fetch: F) -> Result<(), BoxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), BoxError>>,
{
    let Some(secs) = watch else {
        return fetch().await;
    };

    info!(interval_secs = secs, "polling; press Ctrl-C to stop");
    let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));
    loop {
        interval.tick().await;
        if let Err(e) = fetch().await {
            warn!(error = %e, "poll failed");
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
