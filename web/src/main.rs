//! Web front end for battery health predictions.

mod routes;
mod templates;

use anyhow::{Context, Result};
use battery_sim_core::config::SimulationConfig;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Battery health prediction web demo")]
struct Args {
    /// Simulation configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (ip or host)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let Args { config, host, port } = Args::parse();

    let config = match config {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let system = config
        .build_system()
        .context("failed to prepare battery model")?;
    let app = routes::build_app(routes::AppState::new(system));

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("failed to parse bind address")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listener on {addr}"))?;

    info!("serving battery health predictions on http://{}", addr);

    let server = axum::serve(listener, app.into_make_service());

    tokio::select! {
        result = server => result.context("server exited with error")?,
        _ = signal::ctrl_c() => {
            warn!("received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    let _ = fmt().with_env_filter(env_filter).try_init();
}
