use anyhow::Context;
use tracing_subscriber::EnvFilter;

use microtips_rs::api::{AppState, TipServer};
use microtips_rs::helpers::{build_tip_source, start_tip_cache};
use microtips_rs::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ServiceConfig::from_env().context("invalid configuration")?;
    let source = build_tip_source(&cfg).context("failed to build tip source")?;
    let cache = start_tip_cache(&cfg, source);

    let server = TipServer::new(cfg.port, AppState::new(cache, &cfg.api_token));
    server.start().await.context("server error")?;
    Ok(())
}
