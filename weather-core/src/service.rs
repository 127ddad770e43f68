use anyhow::Context;
use chrono::{DateTime, Utc};
use std::{fmt, sync::Arc};
use tracing::instrument;

use crate::{
    config::Config,
    current::build_current,
    error::WeatherError,
    forecast::aggregate,
    model::{LocationLabel, WeatherReport},
    provider::{ForecastSource, LocationResolver, OpenMeteoGeocoder, OpenMeteoSource},
    series::{RawSeries, Series},
    units::Units,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Resolves locations, fetches forecasts and normalizes them into a
/// [`WeatherReport`].
///
/// Every collaborator failure is translated into [`WeatherError`]; nothing is
/// retried.
pub struct WeatherService<S, R> {
    source: S,
    resolver: R,
    clock: Clock,
}

impl<S: fmt::Debug, R: fmt::Debug> fmt::Debug for WeatherService<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("source", &self.source)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl<S: ForecastSource, R: LocationResolver> WeatherService<S, R> {
    pub fn new(source: S, resolver: R) -> Self {
        Self {
            source,
            resolver,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock used to pick the current hour.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Weather at a point. The place label is looked up alongside the
    /// forecast; if that lookup fails the report is labeled "Unknown".
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<WeatherReport, WeatherError> {
        let (label, raw) = tokio::join!(
            self.label_for(latitude, longitude),
            self.source.fetch(latitude, longitude, units),
        );

        self.build_report(raw?, label, units)
    }

    /// Weather for a city name. Blank names fail with
    /// [`WeatherError::NotFound`] without contacting any collaborator.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_city_name(
        &self,
        name: &str,
        units: Units,
    ) -> Result<WeatherReport, WeatherError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WeatherError::NotFound(String::new()));
        }

        let location = self
            .resolver
            .resolve(name)
            .await?
            .ok_or_else(|| WeatherError::NotFound(name.to_string()))?;

        let raw = self
            .source
            .fetch(location.latitude, location.longitude, units)
            .await?;

        self.build_report(raw, location.label(), units)
    }

    async fn label_for(&self, latitude: f64, longitude: f64) -> LocationLabel {
        match self.resolver.reverse_resolve(latitude, longitude).await {
            Ok(label) => label,
            Err(err) => {
                tracing::warn!(%err, latitude, longitude, "reverse lookup failed; labeling as unknown");
                LocationLabel::unknown()
            }
        }
    }

    fn build_report(
        &self,
        raw: RawSeries,
        label: LocationLabel,
        units: Units,
    ) -> Result<WeatherReport, WeatherError> {
        let series = Series::try_from(raw)?;
        let now = series.local_time((self.clock)());
        tracing::debug!(
            %now,
            hours = series.hours.len(),
            days = series.days.len(),
            "normalizing payload"
        );

        let current = build_current(&series, label.clone(), now)?;
        let forecast = aggregate(&series, label);

        Ok(WeatherReport {
            units,
            current,
            forecast,
        })
    }
}

/// Construct the HTTP-backed service from config.
pub fn service_from_config(
    config: &Config,
) -> anyhow::Result<WeatherService<OpenMeteoSource, OpenMeteoGeocoder>> {
    let timeout = config.request_timeout();
    let endpoints = &config.endpoints;

    let source = OpenMeteoSource::new(&endpoints.forecast_url, timeout)
        .context("Failed to build forecast HTTP client")?;
    let resolver = OpenMeteoGeocoder::new(
        &endpoints.geocoding_url,
        &endpoints.reverse_geocoding_url,
        timeout,
    )
    .context("Failed to build geocoding HTTP client")?;

    Ok(WeatherService::new(source, resolver))
}
