use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use movers_feed::api::{self, AppContext};
use movers_feed::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let ctx = AppContext::new(&config).context("failed to build aggregation context")?;
    let app = api::router(ctx);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %config.server.bind_addr,
        mirrors = config.bybit.mirrors.len(),
        "movers-feed listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
