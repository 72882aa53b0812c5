//! Clock-time windows for time-based toll discounts.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A clock-time range within a single day.
///
/// The start is always inclusive. The end is exclusive unless
/// `end_inclusive` is set, which lets the last window of a day close on
/// `23:59:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub end_inclusive: bool,
}

impl TimeWindow {
    pub fn half_open(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    pub fn closed(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            end_inclusive: true,
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if time < self.start {
            return false;
        }
        if self.end_inclusive {
            time <= self.end
        } else {
            time < self.end
        }
    }

    /// True when both clock times fall inside this window.
    pub fn spans(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.contains(start) && self.contains(end)
    }

    /// `[00:00, 10:00)`, `[10:00, 18:00)` and `[18:00, 23:59:59]`.
    pub fn default_day() -> Vec<TimeWindow> {
        vec![
            TimeWindow::half_open(NaiveTime::MIN, MORNING_END),
            TimeWindow::half_open(MORNING_END, DAYTIME_END),
            TimeWindow::closed(DAYTIME_END, LAST_SECOND),
        ]
    }
}

const MORNING_END: NaiveTime = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
const DAYTIME_END: NaiveTime = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
const LAST_SECOND: NaiveTime = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(hour: u32, min: u32, sec: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, sec).unwrap()
    }

    #[test]
    fn half_open_excludes_end() {
        let window = TimeWindow::half_open(hms(10, 0, 0), hms(18, 0, 0));
        assert!(window.contains(hms(10, 0, 0)));
        assert!(window.contains(hms(17, 59, 59)));
        assert!(!window.contains(hms(18, 0, 0)));
        assert!(!window.contains(hms(9, 59, 59)));
    }

    #[test]
    fn closed_window_includes_last_second() {
        let window = TimeWindow::closed(hms(18, 0, 0), hms(23, 59, 59));
        assert!(window.contains(hms(23, 59, 59)));
        assert!(window.spans(hms(18, 0, 0), hms(23, 59, 59)));
    }

    #[test]
    fn default_day_windows_are_contiguous() {
        let windows = TimeWindow::default_day();
        assert_eq!(windows.len(), 3);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(windows[0].start, NaiveTime::MIN);
        assert_eq!(windows[2].end, hms(23, 59, 59));
        assert!(windows[2].end_inclusive);
    }
}
