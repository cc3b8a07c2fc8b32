//! Turns raw provider bytes into the public response shape.

use crate::{
    convert::kelvin_to_fahrenheit,
    error::WeatherError,
    model::{WeatherRecord, WeatherResponse},
};

/// A bare `null` body decodes to an all-default record.
pub fn decode(body: &[u8]) -> Result<WeatherRecord, WeatherError> {
    let record: Option<WeatherRecord> = serde_json::from_slice(body)?;
    Ok(record.unwrap_or_default())
}

pub fn to_response(record: &WeatherRecord) -> Result<WeatherResponse, WeatherError> {
    let kelvin = record.main.temp;
    let temperature = kelvin_to_fahrenheit(kelvin);
    // JSON has no encoding for infinities.
    if !temperature.is_finite() {
        return Err(WeatherError::NonFiniteTemperature(kelvin));
    }

    Ok(WeatherResponse {
        location: record.city_name.clone(),
        temperature,
    })
}

/// Decode and reduce in one step.
pub fn transform(body: &[u8]) -> Result<WeatherResponse, WeatherError> {
    to_response(&decode(body)?)
}
