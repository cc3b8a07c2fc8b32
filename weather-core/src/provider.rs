use crate::{config::ProviderConfig, error::WeatherError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use bytes::Bytes;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of raw current-weather payloads for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &str) -> Result<Bytes, WeatherError>;
}

/// Construct the shared provider handle from config.
pub fn provider_from_config(config: &ProviderConfig) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Arc::new(provider))
}
