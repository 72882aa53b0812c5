//! Weekly time-coverage validation for (`id`, `id_2`) pairs.
//!
//! A pair is complete when its records jointly cover every second of a
//! Monday-to-Sunday week. End times are inclusive to the second, so a
//! record from `Monday 00:00:00` to `Monday 23:59:59` covers one full
//! 86 400-second day.
//!
//! Weekday-name records all sit on one reference week. Records with
//! calendar dates must cover the seven days that follow the pair's
//! earliest start, so days taken from different weeks never combine.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use polars::prelude::{Column, DataFrame};
use toll_ingest::coverage_records;
use toll_model::{CoverageRecord, Identifier};
use tracing::debug;

use crate::error::Result;
use crate::matrix::identifier_column;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Per-pair outcome of the coverage checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageCheck {
    /// Every day of the week is covered for a full 24 hours.
    pub full_days: bool,
    /// The earliest start falls on Monday.
    pub starts_monday: bool,
    /// The latest end falls on Sunday.
    pub ends_sunday: bool,
}

impl CoverageCheck {
    /// A group with any unparseable timestamp.
    const INCOMPLETE: CoverageCheck = CoverageCheck {
        full_days: false,
        starts_monday: false,
        ends_sunday: false,
    };

    pub fn is_complete(self) -> bool {
        self.full_days && self.starts_monday && self.ends_sunday
    }
}

/// One boolean per (`id`, `id_2`) pair: does the pair cover a full week?
///
/// Returns a frame with columns `id`, `id_2` and `complete`, sorted by
/// pair. Groups with an unparseable timestamp are `false`.
pub fn time_check(df: &DataFrame) -> Result<DataFrame> {
    let checks = coverage_by_pair(df)?;
    let mut ids = Vec::with_capacity(checks.len());
    let mut ids_2 = Vec::with_capacity(checks.len());
    let mut complete = Vec::with_capacity(checks.len());
    for ((id, id_2), check) in checks {
        ids.push(id);
        ids_2.push(id_2);
        complete.push(check.is_complete());
    }
    Ok(DataFrame::new(vec![
        identifier_column("id", &ids),
        identifier_column("id_2", &ids_2),
        Column::new("complete".into(), complete),
    ])?)
}

/// Coverage checks keyed by (`id`, `id_2`).
pub fn coverage_by_pair(
    df: &DataFrame,
) -> Result<BTreeMap<(Identifier, Identifier), CoverageCheck>> {
    let records = coverage_records(df)?;
    let mut groups: BTreeMap<(Identifier, Identifier), Vec<&CoverageRecord>> = BTreeMap::new();
    for record in &records {
        groups
            .entry((record.id.clone(), record.id_2.clone()))
            .or_default()
            .push(record);
    }
    let checks: BTreeMap<_, _> = groups
        .into_iter()
        .map(|(key, group)| (key, check_group(&group)))
        .collect();
    debug!(
        pairs = checks.len(),
        complete = checks.values().filter(|check| check.is_complete()).count(),
        "time coverage checked"
    );
    Ok(checks)
}

/// Inclusive duration of a record in seconds, `None` if a timestamp is missing.
pub fn duration_seconds(record: &CoverageRecord) -> Option<i64> {
    let (start, end) = record.interval()?;
    Some((end - start).num_seconds() + 1)
}

fn check_group(group: &[&CoverageRecord]) -> CoverageCheck {
    let mut intervals = Vec::with_capacity(group.len());
    for record in group {
        let (Some((start, end)), Some(duration)) = (record.interval(), duration_seconds(record))
        else {
            return CoverageCheck::INCOMPLETE;
        };
        if duration <= 0 {
            return CoverageCheck::INCOMPLETE;
        }
        intervals.push((start, end, duration));
    }

    let earliest = intervals.iter().map(|(start, _, _)| *start).min();
    let latest = intervals.iter().map(|(_, end, _)| *end).max();
    let covered = match earliest {
        Some(anchor) if group.iter().any(|record| record.dated) => covered_from(anchor, &intervals),
        _ => covered_seconds(&intervals),
    };
    CoverageCheck {
        full_days: covered == SECONDS_PER_WEEK,
        starts_monday: earliest.is_some_and(|start| start.weekday() == Weekday::Mon),
        ends_sunday: latest.is_some_and(|end| end.weekday() == Weekday::Sun),
    }
}

/// Seconds of the Monday-based week covered by the union of intervals.
///
/// Used for weekday-name records, which all sit on one reference week;
/// an interval running past Sunday wraps back onto Monday.
fn covered_seconds(intervals: &[(NaiveDateTime, NaiveDateTime, i64)]) -> i64 {
    let mut segments = Vec::with_capacity(intervals.len() * 2);
    for &(start, _, duration) in intervals {
        if duration >= SECONDS_PER_WEEK {
            return SECONDS_PER_WEEK;
        }
        let offset = week_offset(start);
        let stop = offset + duration;
        if stop <= SECONDS_PER_WEEK {
            segments.push((offset, stop));
        } else {
            segments.push((offset, SECONDS_PER_WEEK));
            segments.push((0, stop - SECONDS_PER_WEEK));
        }
    }
    merged_length(segments)
}

/// Seconds of `[anchor, anchor + 7 days)` covered by the union of intervals.
///
/// Used for calendar-dated records: days from different weeks do not
/// add up to one week.
fn covered_from(
    anchor: NaiveDateTime,
    intervals: &[(NaiveDateTime, NaiveDateTime, i64)],
) -> i64 {
    let segments = intervals
        .iter()
        .filter_map(|&(start, _, duration)| {
            let offset = (start - anchor).num_seconds();
            let stop = (offset + duration).min(SECONDS_PER_WEEK);
            (offset < SECONDS_PER_WEEK).then_some((offset, stop))
        })
        .collect();
    merged_length(segments)
}

/// Total length of the union of `[start, stop)` segments.
fn merged_length(mut segments: Vec<(i64, i64)>) -> i64 {
    segments.sort_unstable();
    let mut covered = 0;
    let mut current: Option<(i64, i64)> = None;
    for (start, stop) in segments {
        current = match current {
            Some((open, close)) if start <= close => Some((open, close.max(stop))),
            Some((open, close)) => {
                covered += close - open;
                Some((start, stop))
            }
            None => Some((start, stop)),
        };
    }
    if let Some((open, close)) = current {
        covered += close - open;
    }
    covered
}

/// Seconds since Monday 00:00:00 of the timestamp's week.
fn week_offset(timestamp: NaiveDateTime) -> i64 {
    i64::from(timestamp.weekday().num_days_from_monday()) * SECONDS_PER_DAY
        + i64::from(timestamp.time().num_seconds_from_midnight())
}
