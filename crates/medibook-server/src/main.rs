use anyhow::Context;
use clap::Parser;
use medibook_server::{app, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "medibook_core=info,medibook_server=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::parse();
    let core = config
        .open_core()
        .with_context(|| format!("failed to open database {}", config.database))?;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, database = %config.database, "medibook server listening");

    axum::serve(listener, app(core, config.request_timeout()))
        .await
        .context("server error")?;
    Ok(())
}
