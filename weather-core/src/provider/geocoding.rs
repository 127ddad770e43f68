//! Place lookup: Open-Meteo geocoding for names, Nominatim for coordinates.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::ProviderError,
    model::{Location, LocationLabel},
};

use super::{LocationResolver, get_json, http_client};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_REVERSE_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    search_url: String,
    reverse_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(
        search_url: impl Into<String>,
        reverse_url: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            search_url: search_url.into(),
            reverse_url: reverse_url.into(),
            http: http_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    fn into_label(self) -> Option<LocationLabel> {
        let country = self.country.unwrap_or_default();
        let place = self
            .city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .or(self.county)
            .or(self.state)?;

        Some(LocationLabel::new(place, country))
    }
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    async fn resolve(&self, name: &str) -> Result<Option<Location>, ProviderError> {
        let query = [
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let body: SearchResponse = get_json(&self.http, &self.search_url, &query).await?;

        let location = body.results.into_iter().next().map(|r| Location {
            name: r.name,
            country: r.country.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
        });

        match &location {
            Some(loc) => tracing::info!(
                query = name,
                resolved = %loc.label(),
                latitude = loc.latitude,
                longitude = loc.longitude,
                "resolved location"
            ),
            None => tracing::debug!(query = name, "no geocoding results"),
        }

        Ok(location)
    }

    async fn reverse_resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationLabel, ProviderError> {
        let query = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("zoom", "10".to_string()),
        ];

        let body: NominatimResponse = get_json(&self.http, &self.reverse_url, &query).await?;

        body.address
            .and_then(NominatimAddress::into_label)
            .ok_or_else(|| ProviderError::Decode("no place name in reverse lookup".to_string()))
    }
}
