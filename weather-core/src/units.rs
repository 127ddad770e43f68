//! Unit conversion and the display rounding policy.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Millimeters of mercury per hectopascal.
pub const MMHG_PER_HPA: f64 = 0.750062;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    /// Extra query parameters the forecast provider needs for this system.
    pub fn query_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Units::Metric => &[],
            Units::Imperial => &[("temperature_unit", "fahrenheit"), ("windspeed_unit", "mph")],
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(format!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// Convert hectopascals to millimeters of mercury. Unrounded.
pub fn hpa_to_mmhg(hpa: f64) -> f64 {
    hpa * MMHG_PER_HPA
}

/// Eight-way compass label for a wind direction in degrees.
///
/// Any finite input is accepted; values outside `0..360` wrap.
pub fn wind_direction_label(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let octant = (normalized / 45.0).round() as usize % COMPASS.len();
    COMPASS[octant]
}

/// Integer rounding used for temperatures, humidity, pressure, cloud cover
/// and visibility.
pub fn round_display(value: f64) -> i32 {
    value.round() as i32
}

/// One-decimal rounding used for averaged wind speed.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_atmosphere_is_760_mmhg() {
        let mmhg = hpa_to_mmhg(1013.25);
        assert!((mmhg - 760.0).abs() < 0.5, "got {mmhg}");
        assert_eq!(round_display(mmhg), 760);
    }

    #[test]
    fn pressure_conversion_keeps_precision() {
        let mmhg = hpa_to_mmhg(1000.0);
        assert!((mmhg - 750.062).abs() < 1e-9);
    }

    #[test]
    fn cardinal_points() {
        assert_eq!(wind_direction_label(0.0), "N");
        assert_eq!(wind_direction_label(90.0), "E");
        assert_eq!(wind_direction_label(180.0), "S");
        assert_eq!(wind_direction_label(270.0), "W");
        assert_eq!(wind_direction_label(315.0), "NW");
    }

    #[test]
    fn octant_boundaries_round_up() {
        let expected = ["NE", "E", "SE", "S", "SW", "W", "NW", "N"];
        for (i, label) in expected.iter().enumerate() {
            let boundary = 22.5 + 45.0 * i as f64;
            assert_eq!(wind_direction_label(boundary), *label, "at {boundary}");
            assert_eq!(
                wind_direction_label(boundary - 0.1),
                COMPASS[i],
                "just below {boundary}"
            );
        }
    }

    #[test]
    fn direction_is_periodic() {
        for deg in [0.0, 10.0, 22.5, 44.0, 135.0, 200.0, 337.5, 359.0] {
            assert_eq!(wind_direction_label(deg), wind_direction_label(deg + 360.0));
            assert_eq!(wind_direction_label(deg), wind_direction_label(deg - 360.0));
        }
    }

    #[test]
    fn negative_and_large_degrees_wrap() {
        assert_eq!(wind_direction_label(-90.0), "W");
        assert_eq!(wind_direction_label(720.0), "N");
        assert_eq!(wind_direction_label(405.0), "NE");
    }

    #[test]
    fn rounding_policy() {
        assert_eq!(round_display(12.5), 13);
        assert_eq!(round_display(-0.4), 0);
        assert_eq!(round_tenths(12.345), 12.3);
        assert_eq!(round_tenths(7.25), 7.3);
    }

    #[test]
    fn units_roundtrip() {
        for units in Units::all() {
            let parsed: Units = units.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
        assert!("kelvin".parse::<Units>().unwrap_err().contains("Unknown units"));
    }

    #[test]
    fn imperial_requests_fahrenheit_and_mph() {
        assert!(Units::Metric.query_params().is_empty());
        assert!(
            Units::Imperial
                .query_params()
                .contains(&("temperature_unit", "fahrenheit"))
        );
    }
}
