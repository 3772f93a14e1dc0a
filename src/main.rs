//! chatd - line-oriented chat daemon.

use chatd::config::{self, Config, ConfigError};
use chatd::network::Gateway;
use chatd::state::Hub;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let explicit_path = std::env::args().nth(1);
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(ConfigError::Io(e))
            if explicit_path.is_none() && e.kind() == std::io::ErrorKind::NotFound =>
        {
            warn!(path = %config_path, "Config file not found, using defaults");
            Config::default()
        }
        Err(e) => {
            error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s), refusing to start", errors.len());
    }

    info!(
        server = %config.server.name,
        admin = %config.server.admin,
        listen = %config.listen.address,
        "Starting chatd"
    );

    // Initialize history store
    info!(backend = ?config.history.backend, capacity = config.history.capacity, "Initializing history store");
    let history = chatd::history::from_config(&config.history)?;

    let hub = Arc::new(Hub::new(&config, history));

    // Metrics endpoint
    if let Some(port) = config.server.metrics_port.filter(|p| *p != 0) {
        chatd::metrics::init();
        tokio::spawn(chatd::http::run_http_server(port));
    }

    let gateway = Gateway::bind(config.listen.address, hub).await?;
    gateway.run().await
}
