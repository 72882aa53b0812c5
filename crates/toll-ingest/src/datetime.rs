//! Day and clock-time parsing for timed records.
//!
//! Day cells hold either a weekday name (`Monday`, `Mon`) or an ISO date
//! (`2024-01-06`). Time cells hold 12-hour (`05:00 PM`) or 24-hour
//! (`17:00:00`) clock strings. Weekday names are placed on a fixed
//! reference week so that they combine into ordinary timestamps.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Monday 2024-01-01, the first day of the reference week.
const REFERENCE_MONDAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

const TIME_FORMATS: [&str; 7] = [
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
];

/// A parsed day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    /// A weekday name, placed on the reference week.
    Weekday(Weekday),
    /// A calendar date.
    Date(NaiveDate),
}

impl DayRef {
    pub fn date(self) -> NaiveDate {
        match self {
            DayRef::Date(date) => date,
            DayRef::Weekday(day) => {
                REFERENCE_MONDAY + Duration::days(i64::from(day.num_days_from_monday()))
            }
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayRef::Date(date) => date.weekday(),
            DayRef::Weekday(day) => day,
        }
    }
}

/// Parse a day cell as a weekday name or an ISO date.
pub fn parse_day(raw: &str) -> Option<DayRef> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(day) = trimmed.parse::<Weekday>() {
        return Some(DayRef::Weekday(day));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(DayRef::Date)
}

/// Parse a 12-hour or 24-hour clock string.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Parse a full `YYYY-MM-DD` timestamp with a 12-hour or 24-hour time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Combine start and end day/time cells into timestamps.
///
/// Either side is `None` when its day or time does not parse. When both
/// days are weekday names and the end falls before the start, the record
/// wraps past Sunday and the end moves into the following week.
pub fn resolve_day_time(
    start_day: &str,
    start_time: &str,
    end_day: &str,
    end_time: &str,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let start_ref = parse_day(start_day);
    let end_ref = parse_day(end_day);
    let start = start_ref
        .zip(parse_clock_time(start_time))
        .map(|(day, time)| day.date().and_time(time));
    let mut end = end_ref
        .zip(parse_clock_time(end_time))
        .map(|(day, time)| day.date().and_time(time));

    if let (Some(DayRef::Weekday(_)), Some(DayRef::Weekday(_)), Some(s), Some(e)) =
        (start_ref, end_ref, start, end)
    {
        if e < s {
            end = Some(e + Duration::days(7));
        }
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn weekday_names_land_on_reference_week() {
        let monday = parse_day("Monday").unwrap();
        assert_eq!(monday.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let sunday = parse_day("sun").unwrap();
        assert_eq!(sunday.date(), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(sunday.weekday(), Weekday::Sun);
    }

    #[test]
    fn iso_dates_keep_their_weekday() {
        let day = parse_day("2024-03-09").unwrap();
        assert_eq!(day.weekday(), Weekday::Sat);
        assert!(parse_day("someday").is_none());
        assert!(parse_day("").is_none());
    }

    #[test]
    fn clock_times_in_both_conventions() {
        assert_eq!(parse_clock_time("05:00 PM"), Some(time(17, 0, 0)));
        assert_eq!(parse_clock_time("12:30:15 am"), Some(time(0, 30, 15)));
        assert_eq!(parse_clock_time("23:59:59"), Some(time(23, 59, 59)));
        assert_eq!(parse_clock_time("07:15"), Some(time(7, 15, 0)));
        assert_eq!(parse_clock_time("25:00:00"), None);
    }

    #[test]
    fn full_timestamps() {
        let ts = parse_timestamp("2024-01-06 11:30:00").unwrap();
        assert_eq!(ts.weekday(), Weekday::Sat);
        assert_eq!(ts.time(), time(11, 30, 0));
        assert!(parse_timestamp("2024-01-06 2:00 PM").is_some());
        assert!(parse_timestamp("11:30:00").is_none());
    }

    #[test]
    fn weekday_ranges_wrap_past_sunday() {
        let (start, end) = resolve_day_time("Sunday", "18:00:00", "Monday", "06:00:00");
        let (start, end) = (start.unwrap(), end.unwrap());
        assert_eq!((end - start).num_hours(), 12);
    }

    #[test]
    fn unparseable_side_is_none() {
        let (start, end) = resolve_day_time("Monday", "noon", "Monday", "23:59:59");
        assert!(start.is_none());
        assert!(end.is_some());
    }
}
