//! Temperature unit conversions.

const KELVIN_OFFSET: f64 = 273.15;

/// Converts Kelvin to Fahrenheit without rounding.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 1.8 + 32.0
}
