use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{classify::Condition, units::Units};

/// Label used when a place name can't be determined.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn label(&self) -> LocationLabel {
        LocationLabel {
            city: self.name.clone(),
            country: self.country.clone(),
        }
    }
}

/// Human-readable place name attached to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLabel {
    pub city: String,
    pub country: String,
}

impl LocationLabel {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PLACE, "")
    }

    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN_PLACE && self.country.is_empty()
    }
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            f.write_str(&self.city)
        } else {
            write!(f, "{}, {}", self.city, self.country)
        }
    }
}

/// Current weather, ready for display. Pressure is in mmHg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub location: LocationLabel,
    pub observed_at: NaiveDateTime,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: i32,
    pub pressure: i32,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_direction_label: &'static str,
    pub cloud_cover: i32,
    pub visibility: i32,
    pub condition: Condition,
    pub temp_min: i32,
    pub temp_max: i32,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: i32,
    pub pressure: i32,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_direction_label: &'static str,
    pub cloud_cover: i32,
    pub condition: Condition,
}

/// One calendar day of the forecast.
///
/// The averaged fields are `None` when no hourly sample falls on `date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temp_min: i32,
    pub temp_max: i32,
    pub temp_avg: i32,
    pub humidity: Option<i32>,
    pub pressure: Option<i32>,
    pub wind_speed: Option<f64>,
    pub condition: Condition,
    pub hourly: Vec<HourlySample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location: LocationLabel,
    pub days: Vec<DayForecast>,
}

/// Everything one weather request produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub units: Units,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}
