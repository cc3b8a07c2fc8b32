//! The request pipeline: fetch, decode, convert.

use std::sync::Arc;

use crate::{
    error::WeatherError,
    model::WeatherResponse,
    provider::WeatherProvider,
    transform::{decode, to_response},
};

/// Shared entry point used by request handlers.
///
/// Cloning is cheap: every clone points at the same provider.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Current conditions for `location`, temperature in Fahrenheit.
    pub async fn current(&self, location: &str) -> Result<WeatherResponse, WeatherError> {
        let body = self.provider.fetch(location).await?;
        let record = decode(&body)?;

        log::debug!(
            "Decoded weather for {:?} ({}), observed at {:?}",
            record.city_name,
            record.sys.country_code,
            record.observed_at()
        );

        to_response(&record)
    }
}
