//! Provider payload and its normalized, record-per-sample form.
//!
//! [`RawSeries`] mirrors the Open-Meteo forecast response: parallel arrays on
//! an hourly and a daily axis plus a `current_weather` snapshot. Every field is
//! optional here so that an absent one surfaces as [`SeriesError::Missing`]
//! instead of a generic decode failure. [`Series`] zips the arrays into
//! records once; nothing downstream indexes the raw arrays.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;

use crate::error::SeriesError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSeries {
    pub utc_offset_seconds: Option<i32>,
    pub timezone: Option<String>,
    pub current_weather: Option<RawSnapshot>,
    pub hourly: Option<RawHourly>,
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    pub time: Option<String>,
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub winddirection: Option<f64>,
    pub weathercode: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHourly {
    pub time: Option<Vec<String>>,
    pub temperature_2m: Option<Vec<f64>>,
    pub apparent_temperature: Option<Vec<f64>>,
    pub relativehumidity_2m: Option<Vec<f64>>,
    pub pressure_msl: Option<Vec<f64>>,
    pub windspeed_10m: Option<Vec<f64>>,
    pub winddirection_10m: Option<Vec<f64>>,
    pub cloudcover: Option<Vec<f64>>,
    pub visibility: Option<Vec<f64>>,
    pub weathercode: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDaily {
    pub time: Option<Vec<String>>,
    pub weathercode: Option<Vec<i32>>,
    pub temperature_2m_max: Option<Vec<f64>>,
    pub temperature_2m_min: Option<Vec<f64>>,
    pub sunrise: Option<Vec<String>>,
    pub sunset: Option<Vec<String>>,
}

/// Conditions at fetch time, straight from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub weather_code: i32,
}

/// One sample of the hourly axis. Pressure is in hPa, as reported.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub pressure_hpa: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub cloud_cover: f64,
    pub visibility: f64,
    pub weather_code: i32,
}

/// One sample of the daily axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_min: f64,
    pub temp_max: f64,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

/// A validated payload. All times are local to `utc_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub utc_offset: FixedOffset,
    pub snapshot: Snapshot,
    pub hours: Vec<HourRecord>,
    pub days: Vec<DayRecord>,
}

impl Series {
    /// Wall-clock time in the provider's reporting timezone.
    pub fn local_time<Tz: TimeZone>(&self, instant: DateTime<Tz>) -> NaiveDateTime {
        instant.with_timezone(&self.utc_offset).naive_local()
    }
}

impl TryFrom<RawSeries> for Series {
    type Error = SeriesError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        let offset_secs = raw.utc_offset_seconds.unwrap_or(0);
        let utc_offset =
            FixedOffset::east_opt(offset_secs).ok_or(SeriesError::InvalidOffset(offset_secs))?;

        let snapshot = raw
            .current_weather
            .ok_or(SeriesError::Missing("current_weather"))
            .and_then(snapshot_from_raw)?;
        let hours = raw
            .hourly
            .ok_or(SeriesError::Missing("hourly"))
            .and_then(hours_from_raw)?;
        let days = raw
            .daily
            .ok_or(SeriesError::Missing("daily"))
            .and_then(days_from_raw)?;

        Ok(Series {
            utc_offset,
            snapshot,
            hours,
            days,
        })
    }
}

fn snapshot_from_raw(raw: RawSnapshot) -> Result<Snapshot, SeriesError> {
    let time = raw.time.ok_or(SeriesError::Missing("current_weather.time"))?;

    Ok(Snapshot {
        time: parse_datetime(&time)?,
        temperature: raw
            .temperature
            .ok_or(SeriesError::Missing("current_weather.temperature"))?,
        wind_speed: raw
            .windspeed
            .ok_or(SeriesError::Missing("current_weather.windspeed"))?,
        wind_direction: raw
            .winddirection
            .ok_or(SeriesError::Missing("current_weather.winddirection"))?,
        weather_code: raw
            .weathercode
            .ok_or(SeriesError::Missing("current_weather.weathercode"))?,
    })
}

fn hours_from_raw(raw: RawHourly) -> Result<Vec<HourRecord>, SeriesError> {
    let time = raw.time.ok_or(SeriesError::Missing("hourly.time"))?;
    let len = time.len();

    let temperature = column(raw.temperature_2m, "hourly.temperature_2m", len)?;
    let apparent = column(raw.apparent_temperature, "hourly.apparent_temperature", len)?;
    let humidity = column(raw.relativehumidity_2m, "hourly.relativehumidity_2m", len)?;
    let pressure = column(raw.pressure_msl, "hourly.pressure_msl", len)?;
    let wind_speed = column(raw.windspeed_10m, "hourly.windspeed_10m", len)?;
    let wind_direction = column(raw.winddirection_10m, "hourly.winddirection_10m", len)?;
    let cloud_cover = column(raw.cloudcover, "hourly.cloudcover", len)?;
    let visibility = column(raw.visibility, "hourly.visibility", len)?;
    let weather_code = column(raw.weathercode, "hourly.weathercode", len)?;

    let hours = time
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Ok::<_, SeriesError>(HourRecord {
                time: parse_datetime(t)?,
                temperature: temperature[i],
                apparent_temperature: apparent[i],
                humidity: humidity[i],
                pressure_hpa: pressure[i],
                wind_speed: wind_speed[i],
                wind_direction: wind_direction[i],
                cloud_cover: cloud_cover[i],
                visibility: visibility[i],
                weather_code: weather_code[i],
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Equal neighbours are allowed; buckets keep axis order.
    ensure_ordered(&hours, "hourly.time", |a, b| a.time <= b.time)?;
    Ok(hours)
}

fn days_from_raw(raw: RawDaily) -> Result<Vec<DayRecord>, SeriesError> {
    let time = raw.time.ok_or(SeriesError::Missing("daily.time"))?;
    let len = time.len();

    let weather_code = column(raw.weathercode, "daily.weathercode", len)?;
    let temp_max = column(raw.temperature_2m_max, "daily.temperature_2m_max", len)?;
    let temp_min = column(raw.temperature_2m_min, "daily.temperature_2m_min", len)?;
    let sunrise = column(raw.sunrise, "daily.sunrise", len)?;
    let sunset = column(raw.sunset, "daily.sunset", len)?;

    let days = time
        .iter()
        .enumerate()
        .map(|(i, d)| {
            Ok::<_, SeriesError>(DayRecord {
                date: parse_date(d)?,
                weather_code: weather_code[i],
                temp_min: temp_min[i],
                temp_max: temp_max[i],
                sunrise: parse_datetime(&sunrise[i])?,
                sunset: parse_datetime(&sunset[i])?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // A repeated date would hand the same hourly samples to two days.
    ensure_ordered(&days, "daily.time", |a, b| a.date < b.date)?;
    Ok(days)
}

/// Fail at the first adjacent pair for which `in_order` is false.
fn ensure_ordered<T>(
    records: &[T],
    field: &'static str,
    in_order: impl Fn(&T, &T) -> bool,
) -> Result<(), SeriesError> {
    match records.windows(2).position(|w| !in_order(&w[0], &w[1])) {
        Some(i) => Err(SeriesError::Unordered {
            field,
            index: i + 1,
        }),
        None => Ok(()),
    }
}

fn column<T>(
    values: Option<Vec<T>>,
    field: &'static str,
    expected: usize,
) -> Result<Vec<T>, SeriesError> {
    let values = values.ok_or(SeriesError::Missing(field))?;
    if values.len() != expected {
        return Err(SeriesError::LengthMismatch {
            field,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Parse a provider timestamp such as `2024-07-15T05:30`.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, SeriesError> {
    NaiveDateTime::parse_from_str(value, MINUTE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, SECOND_FORMAT))
        .map_err(|_| SeriesError::InvalidTime(value.to_string()))
}

/// Parse a provider date such as `2024-07-15`.
pub fn parse_date(value: &str) -> Result<NaiveDate, SeriesError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| SeriesError::InvalidTime(value.to_string()))
}
