//! Core library for the weather proxy service.
//!
//! This crate defines:
//! - Configuration for the listener and the upstream provider
//! - Abstraction over the weather provider, with an OpenWeatherMap client
//! - Provider and public response models, and the transform between them
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod transform;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::WeatherError;
pub use model::{WeatherRecord, WeatherResponse};
pub use provider::{WeatherProvider, provider_from_config};
pub use service::WeatherService;
