use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{error::ProviderError, series::RawSeries, units::Units};

use super::{ForecastSource, get_json, http_client};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,relativehumidity_2m,pressure_msl,\
windspeed_10m,winddirection_10m,cloudcover,visibility,weathercode";
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Days requested from the provider; the forecast keeps the first five.
const REQUEST_DAYS: u8 = 7;

/// Open-Meteo forecast API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            http: http_client(timeout)?,
        })
    }

    fn query(latitude: f64, longitude: f64, units: Units) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", REQUEST_DAYS.to_string()),
        ];
        query.extend(
            units
                .query_params()
                .iter()
                .map(|(k, v)| (*k, (*v).to_string())),
        );
        query
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoSource {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<RawSeries, ProviderError> {
        tracing::debug!(latitude, longitude, %units, url = %self.base_url, "fetching forecast");
        get_json(&self.http, &self.base_url, &Self::query(latitude, longitude, units)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> OpenMeteoSource {
        OpenMeteoSource::new(format!("{}/v1/forecast", server.uri()), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_decodes_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("current_weather", "true"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "utc_offset_seconds": 7200,
                "current_weather": {
                    "time": "2024-07-15T14:00",
                    "temperature": 22.5,
                    "windspeed": 12.5,
                    "winddirection": 270.0,
                    "weathercode": 2
                }
            })))
            .mount(&server)
            .await;

        let raw = source(&server).fetch(52.52, 13.41, Units::Metric).await.unwrap();

        assert_eq!(raw.utc_offset_seconds, Some(7200));
        let snapshot = raw.current_weather.unwrap();
        assert_eq!(snapshot.temperature, Some(22.5));
        assert_eq!(snapshot.weathercode, Some(2));
        assert!(raw.hourly.is_none());
    }

    #[tokio::test]
    async fn imperial_sends_unit_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("temperature_unit", "fahrenheit"))
            .and(query_param("windspeed_unit", "mph"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let raw = source(&server).fetch(40.71, -74.0, Units::Imperial).await;
        assert!(raw.is_ok());
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = source(&server).fetch(0.0, 0.0, Units::Metric).await.unwrap_err();
        assert_eq!(err, ProviderError::RateLimited);
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"reason\":\"bad latitude\"}"))
            .mount(&server)
            .await;

        let err = source(&server).fetch(999.0, 0.0, Units::Metric).await.unwrap_err();
        match err {
            ProviderError::Server { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad latitude"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ invalid json }"))
            .mount(&server)
            .await;

        let err = source(&server).fetch(0.0, 0.0, Units::Metric).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_error() {
        let source =
            OpenMeteoSource::new("http://127.0.0.1:9/v1/forecast", Duration::from_secs(2)).unwrap();

        let err = source.fetch(0.0, 0.0, Units::Metric).await.unwrap_err();
        assert!(matches!(err, ProviderError::Connection(_)));
    }
}
