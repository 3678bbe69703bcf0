//! Map backend server.
//!
//! Loads the point CSVs, fetches the walking route and serves the HTTP API
//! together with the frontend page and the LLM bundle.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use waypoint::server::{build_router, AppState};
use waypoint::{Catalog, Config};

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Points of interest map backend")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(short, long)]
    listen: Option<String>,

    /// Directory holding lokalzacja.csv and database.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// OSRM route service base URL
    #[arg(long)]
    osrm_url: Option<String>,

    /// Skip the routing service entirely
    #[arg(long)]
    no_route: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.server.listen = listen;
        }
        if let Some(dir) = self.data_dir {
            config.data.dir = dir;
        }
        if let Some(url) = self.osrm_url {
            config.osrm.url = url;
        }
        if self.no_route {
            config.osrm.enabled = false;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Args::parse().into_config()?;

    info!("Waypoint map server");
    info!("Data directory: {}", config.data.dir.display());
    if config.osrm.enabled {
        info!("Routing via {} ({})", config.osrm.url, config.osrm.profile);
    }

    let catalog = Catalog::new(&config).context("Failed to create catalog")?;
    if let Err(e) = catalog.reload().await {
        warn!("Failed to load points on startup: {}", e);
    }

    let state = Arc::new(AppState::new(catalog, &config));
    let app = build_router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}
