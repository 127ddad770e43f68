//! Error types.
//!
//! [`WeatherError`] is the only error callers of [`crate::WeatherService`]
//! ever see. [`SeriesError`] and [`ProviderError`] are the lower-level
//! conditions it is translated from.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Failures surfaced to callers of the weather service.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    #[error("Rate limited by weather provider")]
    RateLimited,

    #[error("Weather provider error: {0}")]
    ServerError(String),

    #[error("No connection to weather provider: {0}")]
    NoConnection(String),

    #[error("No hourly sample covers {0}")]
    AlignmentOutOfRange(NaiveDateTime),
}

impl WeatherError {
    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(name) if name.is_empty() => "Please enter a city name".to_string(),
            Self::NotFound(name) => format!("City '{name}' not found"),
            Self::MalformedPayload(_) => {
                "The weather provider returned incomplete data".to_string()
            }
            Self::RateLimited => "Too many requests. Please try again later.".to_string(),
            Self::ServerError(_) => "The weather service is unavailable right now".to_string(),
            Self::NoConnection(_) => "No connection. Check your network.".to_string(),
            Self::AlignmentOutOfRange(_) => {
                "The forecast does not cover the current hour".to_string()
            }
        }
    }
}

/// Problems found while normalizing or aligning a provider payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("`{field}` has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid time value '{0}'")]
    InvalidTime(String),

    #[error("`{field}` goes backwards at entry {index}")]
    Unordered { field: &'static str, index: usize },

    #[error("invalid UTC offset of {0} seconds")]
    InvalidOffset(i32),

    #[error("no hourly sample for {0}")]
    OutOfRange(NaiveDateTime),
}

/// Failures reported by forecast and location collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("rate limited")]
    RateLimited,

    #[error("request failed with status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<SeriesError> for WeatherError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::OutOfRange(at) => WeatherError::AlignmentOutOfRange(at),
            other => WeatherError::MalformedPayload(other.to_string()),
        }
    }
}

impl From<ProviderError> for WeatherError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited => WeatherError::RateLimited,
            ProviderError::Server { status, body } => {
                WeatherError::ServerError(format!("status {status}: {body}"))
            }
            ProviderError::Connection(msg) => WeatherError::NoConnection(msg),
            ProviderError::Decode(msg) => WeatherError::MalformedPayload(msg),
        }
    }
}
