use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Current weather proxy")]
pub struct Cli {
    /// Config file; defaults to `config.toml` in the platform config directory.
    #[arg(env = "WEATHER_CONFIG", short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overriding the config file.
    #[arg(env = "WEATHER_SERVER_ADDRESS", short, long)]
    pub address: Option<SocketAddr>,

    /// Provider API key, overriding the config file.
    #[arg(env = "WEATHER_API_KEY", long, hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration: file first, then flags and env.
    pub fn config(&self) -> anyhow::Result<weather_core::Config> {
        let mut config = match &self.config {
            Some(path) => weather_core::Config::load_from(path)?,
            None => weather_core::Config::load()?,
        };

        if let Some(address) = self.address {
            config.server.address = address;
        }
        if let Some(api_key) = &self.api_key {
            config.set_api_key(api_key.clone());
        }

        Ok(config)
    }
}
