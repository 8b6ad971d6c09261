//! Date windows over daily series.
//!
//! Two rules every metric shares:
//! - no explicit range means "the trailing 30 points";
//! - the previous period is an equal-length window immediately before the current one.

use super::entities::{DailyAiPoint, DailyCtaPoint, DailyTrafficPoint, PageDailyPoint};
use chrono::{Duration, NaiveDate};

/// Number of trailing points used when a range is not fully specified.
pub const DEFAULT_WINDOW_POINTS: usize = 30;

/// Anything keyed by a calendar day.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for DailyTrafficPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for DailyAiPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for DailyCtaPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for PageDailyPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Optional inclusive date bounds. Only a range with both bounds is "explicit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// No bounds: resolves to the trailing default window.
    pub fn trailing() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// Equal-length window ending the day before `start`. `None` when the range is
    /// not explicit or is inverted.
    pub fn preceding(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (start, end) = self.bounds()?;
        let len = (end - start).num_days() + 1;
        if len <= 0 {
            return None;
        }
        let prev_end = start - Duration::days(1);
        let prev_start = prev_end - Duration::days(len - 1);
        Some((prev_start, prev_end))
    }
}

/// Points with `start <= date <= end`, or the trailing 30 points when either bound is missing.
pub fn filter_by_date_range<T: Dated>(
    series: &[T],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&T> {
    match (start, end) {
        (Some(s), Some(e)) => series
            .iter()
            .filter(|p| p.date() >= s && p.date() <= e)
            .collect(),
        _ => {
            let from = series.len().saturating_sub(DEFAULT_WINDOW_POINTS);
            series[from..].iter().collect()
        }
    }
}

/// Points of the period compared against `range`.
///
/// Explicit `compare` bounds win. Otherwise an explicit `range` yields the equal-length
/// window before it, and the trailing default yields the 30 points before the last 30.
pub fn previous_period<T: Dated>(series: &[T], range: DateRange, compare: DateRange) -> Vec<&T> {
    if let Some((s, e)) = compare.bounds() {
        return filter_by_date_range(series, Some(s), Some(e));
    }
    if range.bounds().is_some() {
        return match range.preceding() {
            Some((s, e)) => filter_by_date_range(series, Some(s), Some(e)),
            None => Vec::new(),
        };
    }
    let end = series.len().saturating_sub(DEFAULT_WINDOW_POINTS);
    let start = series.len().saturating_sub(DEFAULT_WINDOW_POINTS * 2);
    series[start..end].iter().collect()
}

/// Concrete dates of the current window, using `series` to resolve the trailing default.
pub fn resolve_window<T: Dated>(series: &[T], range: DateRange) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(bounds) = range.bounds() {
        return Some(bounds);
    }
    let points = filter_by_date_range(series, None, None);
    Some((points.first()?.date(), points.last()?.date()))
}

/// Concrete dates of the previous window; same rules as [`previous_period`].
pub fn resolve_previous_window<T: Dated>(
    series: &[T],
    range: DateRange,
    compare: DateRange,
) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(bounds) = compare.bounds() {
        return Some(bounds);
    }
    if range.bounds().is_some() {
        return range.preceding();
    }
    let points = previous_period(series, range, compare);
    Some((points.first()?.date(), points.last()?.date()))
}
