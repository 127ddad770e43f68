//! Current conditions from a normalized payload.

use chrono::NaiveDateTime;

use crate::{
    align::current_hour_index,
    classify::classify,
    error::SeriesError,
    model::{CurrentConditions, LocationLabel},
    series::Series,
    units::{hpa_to_mmhg, round_display, wind_direction_label},
};

/// Build the current-conditions record.
///
/// `now` must already be in the provider's local time. Temperature, wind and
/// the weather code come from the snapshot; feels-like, humidity, pressure,
/// cloud cover and visibility from the hourly sample for `now`.
///
/// `temp_min`/`temp_max` are the extremes over every day in the payload, not
/// just today. Sunrise and sunset come from the first daily entry.
pub fn build_current(
    series: &Series,
    location: LocationLabel,
    now: NaiveDateTime,
) -> Result<CurrentConditions, SeriesError> {
    let snapshot = &series.snapshot;
    let hour = &series.hours[current_hour_index(&series.hours, now)?];
    let today = series.days.first().ok_or(SeriesError::Missing("daily"))?;

    let temp_min = series
        .days
        .iter()
        .map(|d| d.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = series
        .days
        .iter()
        .map(|d| d.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(CurrentConditions {
        location,
        observed_at: snapshot.time,
        temperature: round_display(snapshot.temperature),
        feels_like: round_display(hour.apparent_temperature),
        humidity: round_display(hour.humidity),
        pressure: round_display(hpa_to_mmhg(hour.pressure_hpa)),
        wind_speed: snapshot.wind_speed,
        wind_direction: snapshot.wind_direction,
        wind_direction_label: wind_direction_label(snapshot.wind_direction),
        cloud_cover: round_display(hour.cloud_cover),
        visibility: round_display(hour.visibility),
        condition: classify(snapshot.weather_code),
        temp_min: round_display(temp_min),
        temp_max: round_display(temp_max),
        sunrise: today.sunrise,
        sunset: today.sunset,
    })
}
