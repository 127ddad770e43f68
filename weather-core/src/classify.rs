//! WMO weather code classification.
//!
//! Codes follow the Open-Meteo documentation:
//! https://open-meteo.com/en/docs#weathervariables
//!
//! Icon ids reuse the OpenWeatherMap day-icon names so a UI can fetch the
//! matching image; [`display_symbol`] is the text fallback when it can't.

use serde::Serialize;

/// Icon shown for codes outside the table.
pub const FALLBACK_ICON: &str = "01d";

/// Description shown for codes outside the table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Glyph shown for icon ids with no symbol of their own.
pub const FALLBACK_SYMBOL: &str = "\u{1F321}"; // THERMOMETER

/// Description and icon for a single weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub description: &'static str,
    pub icon: &'static str,
}

impl Condition {
    const fn new(description: &'static str, icon: &'static str) -> Self {
        Self { description, icon }
    }

    pub fn is_unknown(&self) -> bool {
        self.description == UNKNOWN_DESCRIPTION
    }

    /// Text glyph for this condition's icon.
    pub fn symbol(&self) -> &'static str {
        display_symbol(self.icon)
    }
}

/// Map a WMO weather code to its description and icon.
///
/// Total: unknown codes produce `"Unknown"` with the clear-sky icon.
pub fn classify(code: i32) -> Condition {
    let condition = match code {
        0 => Condition::new("Clear sky", "01d"),
        1 => Condition::new("Mainly clear", "02d"),
        2 => Condition::new("Partly cloudy", "03d"),
        3 => Condition::new("Overcast", "04d"),
        45 => Condition::new("Fog", "50d"),
        48 => Condition::new("Depositing rime fog", "50d"),
        51 => Condition::new("Light drizzle", "09d"),
        53 => Condition::new("Moderate drizzle", "09d"),
        55 => Condition::new("Dense drizzle", "09d"),
        61 => Condition::new("Slight rain", "10d"),
        63 => Condition::new("Moderate rain", "10d"),
        65 => Condition::new("Heavy rain", "10d"),
        71 => Condition::new("Slight snow fall", "13d"),
        73 => Condition::new("Moderate snow fall", "13d"),
        75 => Condition::new("Heavy snow fall", "13d"),
        77 => Condition::new("Snow grains", "13d"),
        80 => Condition::new("Slight rain showers", "09d"),
        81 => Condition::new("Moderate rain showers", "09d"),
        82 => Condition::new("Violent rain showers", "09d"),
        95 => Condition::new("Thunderstorm", "11d"),
        96 => Condition::new("Thunderstorm with slight hail", "11d"),
        99 => Condition::new("Thunderstorm with heavy hail", "11d"),
        _ => Condition::new(UNKNOWN_DESCRIPTION, FALLBACK_ICON),
    };
    if condition.is_unknown() {
        tracing::debug!(code, "unrecognized weather code");
    }
    condition
}

/// Map an icon id to a text glyph.
pub fn display_symbol(icon: &str) -> &'static str {
    match icon {
        "01d" => "\u{2600}",  // BLACK SUN WITH RAYS
        "02d" => "\u{1F324}", // WHITE SUN WITH SMALL CLOUD
        "03d" => "\u{26C5}",  // SUN BEHIND CLOUD
        "04d" => "\u{2601}",  // CLOUD
        "09d" => "\u{1F327}", // CLOUD WITH RAIN
        "10d" => "\u{1F326}", // WHITE SUN BEHIND CLOUD WITH RAIN
        "11d" => "\u{26C8}",  // THUNDER CLOUD AND RAIN
        "13d" => "\u{2744}",  // SNOWFLAKE
        "50d" => "\u{1F32B}", // FOG
        _ => FALLBACK_SYMBOL,
    }
}
