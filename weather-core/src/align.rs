//! Selecting hourly samples by instant or by calendar date.
//!
//! All comparisons happen on naive local times: the provider reports the
//! hourly axis in the location's timezone and callers convert "now" into the
//! same timezone before asking (see [`crate::series::Series::local_time`]).

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::{error::SeriesError, series::HourRecord};

/// Index of the sample for the hour containing `now`.
///
/// The provider emits one sample per hour, so this matches on calendar date
/// and hour-of-day. A `now` outside the covered range is an error; picking a
/// substitute sample is up to the caller.
pub fn current_hour_index(hours: &[HourRecord], now: NaiveDateTime) -> Result<usize, SeriesError> {
    let date = now.date();
    let hour = now.hour();

    hours
        .iter()
        .position(|h| h.time.date() == date && h.time.hour() == hour)
        .ok_or(SeriesError::OutOfRange(now))
}

/// Indices of every sample on `date`, in axis order.
pub fn indices_on(hours: &[HourRecord], date: NaiveDate) -> Vec<usize> {
    hours
        .iter()
        .enumerate()
        .filter(|(_, h)| h.time.date() == date)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{fixtures, parse_datetime};

    fn at(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn finds_current_hour_ignoring_minutes() {
        let series = fixtures::series(2);

        assert_eq!(current_hour_index(&series.hours, at("2024-01-01T10:00")), Ok(10));
        assert_eq!(current_hour_index(&series.hours, at("2024-01-01T10:59")), Ok(10));
        assert_eq!(current_hour_index(&series.hours, at("2024-01-02T00:05")), Ok(24));
    }

    #[test]
    fn same_hour_on_another_day_is_not_a_match() {
        let series = fixtures::series(1);
        let now = at("2024-01-05T10:00");

        assert_eq!(
            current_hour_index(&series.hours, now),
            Err(SeriesError::OutOfRange(now))
        );
    }

    #[test]
    fn short_payload_is_out_of_range() {
        let mut series = fixtures::series(1);
        series.hours.truncate(6);
        let now = at("2024-01-01T12:00");

        assert_eq!(
            current_hour_index(&series.hours, now),
            Err(SeriesError::OutOfRange(now))
        );
    }

    #[test]
    fn buckets_by_calendar_date() {
        let series = fixtures::series(3);
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let idx = indices_on(&series.hours, day);
        assert_eq!(idx, (24..48).collect::<Vec<_>>());
    }

    #[test]
    fn bucket_uses_date_not_rolling_window() {
        let mut series = fixtures::series(2);
        // Keep 2024-01-01T20:00 .. 2024-01-02T03:00
        series.hours = series.hours[20..28].to_vec();

        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(indices_on(&series.hours, first), vec![0, 1, 2, 3]);
        assert_eq!(indices_on(&series.hours, second), vec![4, 5, 6, 7]);
    }

    #[test]
    fn date_outside_payload_has_empty_bucket() {
        let series = fixtures::series(1);
        let day = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(indices_on(&series.hours, day).is_empty());
    }
}
