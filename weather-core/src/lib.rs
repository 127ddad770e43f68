//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Weather code classification and unit conversion
//! - Normalization of raw forecast payloads into current conditions and a
//!   five-day forecast
//! - The collaborator traits for forecast and location lookup, with HTTP
//!   implementations backed by Open-Meteo and Nominatim
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod align;
pub mod classify;
pub mod config;
pub mod current;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod series;
pub mod service;
pub mod units;

pub use classify::{Condition, classify, display_symbol};
pub use config::{Config, Endpoints};
pub use current::build_current;
pub use error::{ProviderError, SeriesError, WeatherError};
pub use forecast::aggregate;
pub use model::{
    CurrentConditions, DayForecast, Forecast, HourlySample, Location, LocationLabel,
    WeatherReport,
};
pub use provider::{ForecastSource, LocationResolver};
pub use series::{RawSeries, Series};
pub use service::{WeatherService, service_from_config};
pub use units::Units;
