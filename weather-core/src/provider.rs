//! Collaborators the weather service talks to, and their HTTP implementations.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};

use crate::{
    error::ProviderError,
    model::{Location, LocationLabel},
    series::RawSeries,
    units::Units,
};

pub mod geocoding;
pub mod open_meteo;

pub use geocoding::OpenMeteoGeocoder;
pub use open_meteo::OpenMeteoSource;

const USER_AGENT: &str = concat!("weather-core/", env!("CARGO_PKG_VERSION"));

/// Source of raw forecast payloads.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<RawSeries, ProviderError>;
}

/// Forward and reverse geocoding.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    /// Look up a place by name. `Ok(None)` means nothing matched.
    async fn resolve(&self, name: &str) -> Result<Option<Location>, ProviderError>;

    /// Name the place at the given coordinates.
    async fn reverse_resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationLabel, ProviderError>;
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// GET `url` and decode a JSON body, classifying failures.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(transport_error)?;

    let status = res.status();
    let body = res.text().await.map_err(transport_error)?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Err(ProviderError::Server {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_decode() {
        ProviderError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        ProviderError::Server {
            status: status.as_u16(),
            body: err.to_string(),
        }
    } else {
        ProviderError::Connection(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
