//! Multi-day forecast aggregation.

use crate::{
    align::indices_on,
    classify::classify,
    model::{DayForecast, Forecast, HourlySample, LocationLabel},
    series::{DayRecord, HourRecord, Series},
    units::{hpa_to_mmhg, round_display, round_tenths, wind_direction_label},
};

/// Number of days a forecast covers at most.
pub const FORECAST_DAYS: usize = 5;

/// Aggregate the payload into at most [`FORECAST_DAYS`] days.
///
/// Each day owns the hourly samples on its calendar date. Min/max and the
/// condition come from the daily axis; humidity, pressure and wind speed are
/// means over the day's own hourly samples and are `None` if there are none.
pub fn aggregate(series: &Series, location: LocationLabel) -> Forecast {
    let days = series
        .days
        .iter()
        .take(FORECAST_DAYS)
        .map(|day| build_day(day, &series.hours))
        .collect();

    Forecast { location, days }
}

fn build_day(day: &DayRecord, hours: &[HourRecord]) -> DayForecast {
    let bucket: Vec<&HourRecord> = indices_on(hours, day.date)
        .into_iter()
        .map(|i| &hours[i])
        .collect();

    tracing::debug!(date = %day.date, samples = bucket.len(), "bucketed hourly samples");

    DayForecast {
        date: day.date,
        temp_min: round_display(day.temp_min),
        temp_max: round_display(day.temp_max),
        temp_avg: round_display((day.temp_min + day.temp_max) / 2.0),
        humidity: mean(&bucket, |h| h.humidity).map(round_display),
        pressure: mean(&bucket, |h| hpa_to_mmhg(h.pressure_hpa)).map(round_display),
        wind_speed: mean(&bucket, |h| h.wind_speed).map(round_tenths),
        condition: classify(day.weather_code),
        hourly: bucket.into_iter().map(hourly_sample).collect(),
    }
}

fn hourly_sample(hour: &HourRecord) -> HourlySample {
    HourlySample {
        time: hour.time,
        temperature: round_display(hour.temperature),
        feels_like: round_display(hour.apparent_temperature),
        humidity: round_display(hour.humidity),
        pressure: round_display(hpa_to_mmhg(hour.pressure_hpa)),
        wind_speed: hour.wind_speed,
        wind_direction: hour.wind_direction,
        wind_direction_label: wind_direction_label(hour.wind_direction),
        cloud_cover: round_display(hour.cloud_cover),
        condition: classify(hour.weather_code),
    }
}

fn mean(samples: &[&HourRecord], field: impl Fn(&HourRecord) -> f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&h| field(h)).sum();
    Some(sum / samples.len() as f64)
}
