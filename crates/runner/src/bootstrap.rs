//! Bootstrap - logging, configuration, and gateway wiring

use log::info;
use pawfinder_gateway::{ConfigError, GatewayConfig, RestError, ShelterClient, load_default_config};
use pawfinder_ports::{Catalog, CatalogError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] RestError),

    #[error("Login failed: {0}")]
    Login(#[from] CatalogError),
}

/// Runner configuration: session identity plus the gateway settings
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub name: String,
    pub email: String,
    pub gateway: GatewayConfig,
}

impl RunnerConfig {
    /// Defaults, with `PAWFINDER_NAME` / `PAWFINDER_EMAIL` /
    /// `PAWFINDER_BASE_URL` environment overrides
    pub fn from_env() -> Result<Self, BootstrapError> {
        let mut gateway = load_default_config()?;
        if let Ok(base_url) = std::env::var("PAWFINDER_BASE_URL") {
            gateway.base_url = base_url;
            gateway.validate()?;
        }
        Ok(Self {
            name: std::env::var("PAWFINDER_NAME").unwrap_or_else(|_| "demo".to_string()),
            email: std::env::var("PAWFINDER_EMAIL")
                .unwrap_or_else(|_| "demo@example.com".to_string()),
            gateway,
        })
    }
}

/// Initialize the logger; safe to call more than once
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Build the REST gateway and establish a session
pub async fn connect(config: &RunnerConfig) -> Result<ShelterClient, BootstrapError> {
    let client = ShelterClient::new(&config.gateway)?;
    client.login(&config.name, &config.email).await?;
    info!("Session established for {}", config.name);
    Ok(client)
}
