use anyhow::{Context, Result};
use dayroute_agents::PlannerConfig;
use dayroute_api::{build_app, ApiConfig};
use dayroute_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("dayroute_api");

    let config = ApiConfig::from_env();
    let planner_config = PlannerConfig::from_env();
    tracing::info!(?planner_config, "planner configuration loaded");

    let app = build_app(&config, planner_config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(bind = %config.bind, "dayroute api started");

    axum::serve(listener, app).await?;
    Ok(())
}
