//! Human-readable rendering of a [`WeatherReport`].

use std::fmt::Write;

use weather_core::{CurrentConditions, DayForecast, Units, WeatherReport};

const DASH: &str = "-";

pub fn render(report: &WeatherReport, hourly: bool) -> String {
    let mut out = String::new();
    render_current(&mut out, &report.current, report.units);
    if report.current.location.is_unknown() {
        let _ = writeln!(out, "  (place name unavailable for these coordinates)");
    }
    out.push('\n');

    let _ = writeln!(out, "Forecast for {}", report.forecast.location);
    for day in &report.forecast.days {
        render_day(&mut out, day, report.units, hourly);
    }
    out
}

fn render_current(out: &mut String, c: &CurrentConditions, units: Units) {
    let t = units.temperature_suffix();
    let _ = writeln!(out, "{} ({})", c.location, c.observed_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(
        out,
        "  {} {}, {}{t} (feels like {}{t})",
        c.condition.symbol(),
        c.condition.description,
        c.temperature,
        c.feels_like,
    );
    let _ = writeln!(out, "  Min/Max:    {}{t} / {}{t}", c.temp_min, c.temp_max);
    let _ = writeln!(out, "  Humidity:   {}%", c.humidity);
    let _ = writeln!(out, "  Pressure:   {} mmHg", c.pressure);
    let _ = writeln!(
        out,
        "  Wind:       {:.1} {} {}",
        c.wind_speed,
        units.speed_suffix(),
        c.wind_direction_label
    );
    let _ = writeln!(out, "  Clouds:     {}%", c.cloud_cover);
    let _ = writeln!(out, "  Visibility: {} m", c.visibility);
    let _ = writeln!(
        out,
        "  Sun:        {} - {}",
        c.sunrise.format("%H:%M"),
        c.sunset.format("%H:%M")
    );
}

fn render_day(out: &mut String, day: &DayForecast, units: Units, hourly: bool) {
    let t = units.temperature_suffix();
    let _ = writeln!(
        out,
        "  {} {} {:<24} {}{t} / {}{t} (avg {}{t})  hum {}  {}  wind {}",
        day.date.format("%a %d %b"),
        day.condition.symbol(),
        day.condition.description,
        day.temp_min,
        day.temp_max,
        day.temp_avg,
        or_dash(day.humidity.map(|h| format!("{h}%"))),
        or_dash(day.pressure.map(|p| format!("{p} mmHg"))),
        or_dash(day.wind_speed.map(|w| format!("{w:.1} {}", units.speed_suffix()))),
    );

    if !hourly {
        return;
    }
    for h in &day.hourly {
        let _ = writeln!(
            out,
            "      {} {} {}{t} {}% {:.1} {} {}",
            h.time.format("%H:%M"),
            h.condition.symbol(),
            h.temperature,
            h.humidity,
            h.wind_speed,
            units.speed_suffix(),
            h.wind_direction_label,
        );
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| DASH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use weather_core::{Forecast, HourlySample, LocationLabel, classify};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn report(units: Units) -> WeatherReport {
        let location = LocationLabel::new("Berlin", "Germany");
        let sample = HourlySample {
            time: at(13, 0),
            temperature: 4,
            feels_like: 1,
            humidity: 81,
            pressure: 760,
            wind_speed: 9.4,
            wind_direction: 45.0,
            wind_direction_label: "NE",
            cloud_cover: 100,
            condition: classify(3),
        };

        WeatherReport {
            units,
            current: CurrentConditions {
                location: location.clone(),
                observed_at: at(10, 0),
                temperature: 15,
                feels_like: 2,
                humidity: 81,
                pressure: 760,
                wind_speed: 9.4,
                wind_direction: 45.0,
                wind_direction_label: "NE",
                cloud_cover: 100,
                visibility: 8000,
                condition: classify(61),
                temp_min: -3,
                temp_max: 12,
                sunrise: at(8, 15),
                sunset: at(16, 5),
            },
            forecast: Forecast {
                location,
                days: vec![
                    DayForecast {
                        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        temp_min: 1,
                        temp_max: 8,
                        temp_avg: 5,
                        humidity: Some(81),
                        pressure: Some(760),
                        wind_speed: Some(9.4),
                        condition: classify(61),
                        hourly: vec![sample],
                    },
                    DayForecast {
                        date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                        temp_min: -3,
                        temp_max: 7,
                        temp_avg: 2,
                        humidity: None,
                        pressure: None,
                        wind_speed: None,
                        condition: classify(3),
                        hourly: Vec::new(),
                    },
                ],
            },
        }
    }

    #[test]
    fn current_block_has_units_and_location() {
        let text = render(&report(Units::Metric), false);

        assert!(text.starts_with("Berlin, Germany (2024-01-01 10:00)"));
        assert!(text.contains("Slight rain, 15°C (feels like 2°C)"));
        assert!(text.contains("-3°C / 12°C"));
        assert!(text.contains("760 mmHg"));
        assert!(text.contains("9.4 km/h NE"));
        assert!(text.contains("08:15 - 16:05"));
    }

    #[test]
    fn unknown_place_gets_a_note() {
        let mut report = report(Units::Metric);
        assert!(!render(&report, false).contains("place name unavailable"));

        report.current.location = LocationLabel::unknown();
        let text = render(&report, false);
        assert!(text.starts_with("Unknown (2024-01-01 10:00)"));
        assert!(text.contains("place name unavailable"));
    }

    #[test]
    fn imperial_suffixes() {
        let text = render(&report(Units::Imperial), false);
        assert!(text.contains("15°F"));
        assert!(text.contains("mph"));
        assert!(!text.contains("km/h"));
    }

    #[test]
    fn empty_day_shows_dashes() {
        let text = render(&report(Units::Metric), false);
        let line = text
            .lines()
            .find(|l| l.contains("Tue 02 Jan"))
            .expect("second day rendered");
        assert!(line.contains("hum -"));
        assert!(line.contains("wind -"));
    }

    #[test]
    fn hourly_rows_only_on_request() {
        let plain = render(&report(Units::Metric), false);
        let detailed = render(&report(Units::Metric), true);

        assert!(!plain.contains("      13:00"));
        assert!(detailed.contains("      13:00"));
        assert!(detailed.lines().count() > plain.lines().count());
    }
}
