//! Binary crate for the `weather-server` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and resolving configuration
//! - Serving `GET /weather/{location}` over HTTP

use clap::Parser;
use env_logger::Env;
use weather_core::{WeatherService, provider_from_config};

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = cli::Cli::parse().config()?;
    if config.provider.api_key.is_none() {
        log::warn!("No provider API key configured; requests are sent without `appid`");
    }

    let provider = provider_from_config(&config.provider)?;
    let service = WeatherService::new(provider);

    // Errors, including a failed bind, are printed once by the runtime on exit.
    server::run(config.server.address, service).await
}
