use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dayroute_agents::{PlannerConfig, RoutePlanner};
use dayroute_api::{build_app, ApiConfig};
use dayroute_core::{haversine_km, RouteRequest};
use dayroute_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "dayroute")]
#[command(about = "Split places into day trips and sequence each day")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan day routes for a request read from a JSON file (`-` for stdin).
    Plan {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, env = "DAYROUTE_KMEANS_RESTARTS")]
        restarts: Option<usize>,
        #[arg(long, env = "DAYROUTE_MAX_PLACES_PER_DAY")]
        max_places: Option<usize>,
    },
    /// Great-circle distance in kilometers between two `LAT,LON` points.
    Distance {
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        #[arg(long, allow_hyphen_values = true)]
        to: String,
    },
    /// Run the HTTP API.
    Serve {
        #[arg(long, env = "DAYROUTE_BIND")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("dayroute_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            input,
            seed,
            restarts,
            max_places,
        } => {
            let mut request = read_request(&input)?;
            if seed.is_some() {
                request.seed = seed;
            }

            let mut config = PlannerConfig::from_env();
            if let Some(restarts) = restarts.filter(|value| *value > 0) {
                config.restarts = restarts;
            }
            if let Some(max_places) = max_places.filter(|value| *value > 0) {
                config.max_places_per_day = max_places;
            }

            let planner = RoutePlanner::with_kmeans(config, AppMetrics::shared());
            let response = planner.plan(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Distance { from, to } => {
            let from = parse_point(&from).context("invalid --from value")?;
            let to = parse_point(&to).context("invalid --to value")?;
            println!("{:.6}", haversine_km(&from, &to));
        }
        Command::Serve { bind } => {
            let mut config = ApiConfig::from_env();
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let app = build_app(&config, PlannerConfig::from_env());
            let listener = tokio::net::TcpListener::bind(&config.bind)
                .await
                .with_context(|| format!("failed to bind {}", config.bind))?;
            tracing::info!(bind = %config.bind, "dayroute api started");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn read_request(path: &PathBuf) -> Result<RouteRequest> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed reading request from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed reading request at {}", path.display()))?
    };

    serde_json::from_str(&raw).context("request is not a valid route request")
}

fn parse_point(value: &str) -> Result<(f64, f64)> {
    let Some((lat, lon)) = value.split_once(',') else {
        bail!("expected LAT,LON but got '{value}'");
    };
    let lat = lat.trim().parse::<f64>().context("latitude is not a number")?;
    let lon = lon.trim().parse::<f64>().context("longitude is not a number")?;
    Ok((lat, lon))
}
