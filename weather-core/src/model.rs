use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reply body of the public `/weather/{location}` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherResponse {
    pub location: String,
    /// Degrees Fahrenheit.
    pub temperature: f64,
}

/// Current weather payload as returned by OpenWeatherMap.
///
/// Every field falls back to its default when absent or `null`, so partial
/// payloads decode instead of failing. Only `name` and `main.temp` are read by the
/// pipeline; the rest is carried for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherRecord {
    #[serde(deserialize_with = "nullable")]
    pub coord: Coord,
    #[serde(deserialize_with = "nullable_list")]
    pub weather: Vec<Condition>,
    #[serde(deserialize_with = "nullable")]
    pub base: String,
    #[serde(deserialize_with = "nullable")]
    pub main: MainMeasurements,
    #[serde(deserialize_with = "nullable")]
    pub wind: Wind,
    #[serde(deserialize_with = "nullable")]
    pub clouds: Clouds,
    #[serde(deserialize_with = "nullable")]
    pub rain: Precipitation,
    #[serde(deserialize_with = "nullable")]
    pub snow: Precipitation,
    #[serde(deserialize_with = "nullable")]
    pub dt: i64,
    #[serde(deserialize_with = "nullable")]
    pub sys: SysInfo,
    #[serde(rename = "id", deserialize_with = "nullable")]
    pub city_id: i64,
    #[serde(rename = "name", deserialize_with = "nullable")]
    pub city_name: String,
    #[serde(deserialize_with = "nullable")]
    pub cod: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coord {
    #[serde(deserialize_with = "nullable")]
    pub lon: f64,
    #[serde(deserialize_with = "nullable")]
    pub lat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub main: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MainMeasurements {
    /// Kelvin.
    #[serde(deserialize_with = "nullable")]
    pub temp: f64,
    #[serde(deserialize_with = "nullable")]
    pub pressure: i64,
    #[serde(deserialize_with = "nullable")]
    pub humidity: i64,
    #[serde(deserialize_with = "nullable")]
    pub temp_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub temp_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(deserialize_with = "nullable")]
    pub speed: f64,
    #[serde(rename = "deg", deserialize_with = "nullable")]
    pub direction: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Clouds {
    #[serde(rename = "all", deserialize_with = "nullable")]
    pub percent: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "3h", deserialize_with = "nullable")]
    pub last_three_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SysInfo {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: i64,
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub message: f64,
    #[serde(rename = "country", deserialize_with = "nullable")]
    pub country_code: String,
    #[serde(deserialize_with = "nullable")]
    pub sunrise: i64,
    #[serde(deserialize_with = "nullable")]
    pub sunset: i64,
}

impl WeatherRecord {
    /// Time of the observation, if the provider sent one.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunrise)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunset)
    }
}

// Zero means the field was missing from the payload.
fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    if ts == 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}

/// `null` decodes to the type's default, same as an absent key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}
