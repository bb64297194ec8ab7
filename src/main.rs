//! Leave engine service - main entry point.
//!
//! Loads seed data for the directory and settings store, then serves the
//! HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use leave_engine::engine::LeaveEngine;
use leave_engine::store::InMemoryStore;

#[derive(Debug, Parser)]
#[command(name = "leave-engine", version, about = "Leave and time accounting service")]
struct Args {
    /// Directory holding settings.yaml and associates.yaml
    #[arg(long, env = "LEAVE_ENGINE_CONFIG", default_value = "./config/default")]
    config_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "LEAVE_ENGINE_BIND", default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,leave_engine=debug")),
        )
        .init();

    let args = Args::parse();

    let seed = ConfigLoader::load(&args.config_dir).with_context(|| {
        format!("failed to load seed data from {}", args.config_dir.display())
    })?;
    info!(
        config_dir = %args.config_dir.display(),
        associates = seed.associates.len(),
        settings = seed.settings.len(),
        "Seed data loaded"
    );

    let store = Arc::new(InMemoryStore::from_seed(seed));
    let app = create_router(AppState::new(LeaveEngine::from_store(store)));

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(bind = %args.bind, "Leave engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
