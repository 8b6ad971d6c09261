//! Metrics engine. Pure aggregation over the generated [`Dataset`].
//!
//! Split by concern: metric cards and charts here, clusters and page
//! classification, production insights, funnel, freshness and industry
//! intelligence in their own modules. Every operation is total: unknown keys or
//! categories return empty results, and ratios never divide by zero.

pub mod clusters;
pub mod format;
pub mod freshness;
pub mod funnel;
pub mod insights;
pub mod intelligence;

use crate::domain::window::{resolve_previous_window, resolve_window};
use crate::domain::{
    ChartKey, ChartPoint, Dataset, DateRange, Lead, LeadStatus, MetricKey, MetricValue, Page,
    filter_by_date_range, previous_period,
};
use chrono::NaiveDate;
use format::{format_count, format_currency, mean, percent_change};
use std::sync::Arc;

pub use clusters::{ClusterAverages, PageSnapshot, classify_page};

/// Read-only view over a dataset. Cheap to clone.
#[derive(Clone)]
pub struct MetricsService {
    data: Arc<Dataset>,
}

impl MetricsService {
    pub fn new(data: Arc<Dataset>) -> Self {
        Self { data }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Last day covered by the series.
    pub fn anchor(&self) -> NaiveDate {
        self.data.anchor
    }

    pub fn find_page(&self, id: u32) -> Option<&Page> {
        self.data.pages.iter().find(|p| p.id == id)
    }

    /// Daily values of a series. Unknown keys yield an empty series.
    pub fn get_chart_data(&self, key: &str, range: DateRange) -> Vec<ChartPoint> {
        let Some(key) = ChartKey::parse(key) else {
            return Vec::new();
        };
        let (start, end) = (range.start, range.end);
        match key {
            ChartKey::Clicks => chart(&self.data.traffic, start, end, |p| p.clicks as f64),
            ChartKey::Impressions => {
                chart(&self.data.traffic, start, end, |p| p.impressions as f64)
            }
            ChartKey::Ctr => chart(&self.data.traffic, start, end, |p| p.ctr),
            ChartKey::Position => chart(&self.data.traffic, start, end, |p| p.avg_position),
            ChartKey::Citations => chart(&self.data.ai, start, end, |p| p.citations as f64),
            ChartKey::Appearances => chart(&self.data.ai, start, end, |p| p.appearances as f64),
            ChartKey::Engine(engine) => {
                chart(&self.data.ai, start, end, |p| p.engine(engine) as f64)
            }
            ChartKey::CtaClicks => chart(&self.data.cta, start, end, |p| p.total_clicks as f64),
        }
    }

    /// Metric card value over `range` and its change against the previous period.
    ///
    /// The previous period is `compare` when both of its bounds are given, otherwise
    /// the equal-length window before `range` (or the 30 points before the trailing 30).
    /// Returns `None` for unknown keys.
    pub fn get_metric_value(
        &self,
        key: &str,
        range: DateRange,
        compare: DateRange,
    ) -> Option<MetricValue> {
        let key = MetricKey::parse(key)?;
        let (current, previous) = self.metric_pair(key, range, compare);
        let value = match key {
            MetricKey::AvgCtr => format!("{:.2}%", current),
            MetricKey::AvgPosition => format!("{:.1}", current),
            MetricKey::PipelineValue => format_currency(current),
            _ => format_count(current.round() as u64),
        };
        Some(MetricValue {
            value,
            raw: current,
            change: percent_change(current, previous).map(|c| c.round() as i64),
            previous_value: previous,
        })
    }

    fn metric_pair(&self, key: MetricKey, range: DateRange, compare: DateRange) -> (f64, f64) {
        let d = &self.data;
        match key {
            MetricKey::TotalClicks => sum_pair(&d.traffic, range, compare, |p| p.clicks as f64),
            MetricKey::TotalImpressions => {
                sum_pair(&d.traffic, range, compare, |p| p.impressions as f64)
            }
            MetricKey::AvgCtr => mean_pair(&d.traffic, range, compare, |p| p.ctr),
            MetricKey::AvgPosition => mean_pair(&d.traffic, range, compare, |p| p.avg_position),
            MetricKey::AiCitations => sum_pair(&d.ai, range, compare, |p| p.citations as f64),
            MetricKey::AiAppearances => sum_pair(&d.ai, range, compare, |p| p.appearances as f64),
            MetricKey::CtaClicks => sum_pair(&d.cta, range, compare, |p| p.total_clicks as f64),
            MetricKey::Leads => self.lead_pair(range, compare, |_| 1.0),
            MetricKey::PipelineValue => self.lead_pair(range, compare, |l| {
                if l.status == LeadStatus::Lost {
                    0.0
                } else {
                    l.value
                }
            }),
        }
    }

    /// Leads are not a daily series; windows are resolved against the traffic dates.
    fn lead_pair(&self, range: DateRange, compare: DateRange, f: impl Fn(&Lead) -> f64) -> (f64, f64) {
        let traffic = &self.data.traffic;
        let current = resolve_window(traffic, range)
            .map(|w| self.lead_sum(w, &f))
            .unwrap_or(0.0);
        let previous = resolve_previous_window(traffic, range, compare)
            .map(|w| self.lead_sum(w, &f))
            .unwrap_or(0.0);
        (current, previous)
    }

    fn lead_sum(&self, (start, end): (NaiveDate, NaiveDate), f: &impl Fn(&Lead) -> f64) -> f64 {
        self.data
            .leads
            .iter()
            .filter(|l| l.created_at >= start && l.created_at <= end)
            .map(f)
            .sum()
    }

    /// Clicks and impressions of one page over `range`.
    pub(crate) fn page_totals(&self, page_id: u32, range: DateRange) -> (u64, u64) {
        match self.data.page_series.get(&page_id) {
            Some(series) => totals(filter_by_date_range(series, range.start, range.end)),
            None => (0, 0),
        }
    }

    /// Clicks and impressions of one page over the period preceding `range`.
    pub(crate) fn page_previous_totals(&self, page_id: u32, range: DateRange) -> (u64, u64) {
        match self.data.page_series.get(&page_id) {
            Some(series) => totals(previous_period(series, range, DateRange::trailing())),
            None => (0, 0),
        }
    }

    /// CTA clicks credited to a landing page URL over `range`.
    pub(crate) fn page_cta_clicks(&self, url: &str, range: DateRange) -> u64 {
        filter_by_date_range(&self.data.cta, range.start, range.end)
            .into_iter()
            .map(|p| p.per_landing_page.get(url).copied().unwrap_or(0))
            .sum()
    }

    /// Leads whose source URL equals `url` exactly.
    pub(crate) fn leads_for_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Lead> + 'a {
        self.data.leads.iter().filter(move |l| l.source_url == url)
    }
}

fn totals(points: Vec<&crate::domain::PageDailyPoint>) -> (u64, u64) {
    points
        .into_iter()
        .fold((0, 0), |(c, i), p| (c + p.clicks, i + p.impressions))
}

fn chart<T: crate::domain::Dated>(
    series: &[T],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    value: impl Fn(&T) -> f64,
) -> Vec<ChartPoint> {
    filter_by_date_range(series, start, end)
        .into_iter()
        .map(|p| ChartPoint {
            date: p.date(),
            value: value(p),
        })
        .collect()
}

fn sum_pair<T: crate::domain::Dated>(
    series: &[T],
    range: DateRange,
    compare: DateRange,
    value: impl Fn(&T) -> f64,
) -> (f64, f64) {
    let current = filter_by_date_range(series, range.start, range.end)
        .into_iter()
        .map(&value)
        .sum();
    let previous = previous_period(series, range, compare)
        .into_iter()
        .map(&value)
        .sum();
    (current, previous)
}

fn mean_pair<T: crate::domain::Dated>(
    series: &[T],
    range: DateRange,
    compare: DateRange,
    value: impl Fn(&T) -> f64,
) -> (f64, f64) {
    let current: Vec<f64> = filter_by_date_range(series, range.start, range.end)
        .into_iter()
        .map(&value)
        .collect();
    let previous: Vec<f64> = previous_period(series, range, compare)
        .into_iter()
        .map(&value)
        .collect();
    (mean(&current), mean(&previous))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::MetricsService;
    use crate::adapters::synthetic::SyntheticGenerator;
    use chrono::NaiveDate;
    use std::sync::Arc;

    pub fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    pub fn service() -> MetricsService {
        MetricsService::new(Arc::new(
            SyntheticGenerator::new(42, anchor(), 90).generate(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{anchor, service};
    use super::*;
    use chrono::Duration;

    #[test]
    fn total_clicks_matches_manual_sum() {
        let svc = service();
        let s = anchor() - Duration::days(20);
        let e = anchor() - Duration::days(5);
        let mv = svc
            .get_metric_value("totalClicks", DateRange::between(s, e), DateRange::trailing())
            .unwrap();
        let manual: u64 = filter_by_date_range(&svc.dataset().traffic, Some(s), Some(e))
            .iter()
            .map(|p| p.clicks)
            .sum();
        assert_eq!(mv.raw, manual as f64);
        assert_eq!(mv.value, format_count(manual));
    }

    #[test]
    fn default_metric_compares_trailing_thirty_to_prior_thirty() {
        let svc = service();
        let mv = svc
            .get_metric_value("ctaClicks", DateRange::trailing(), DateRange::trailing())
            .unwrap();
        let cta = &svc.dataset().cta;
        let current: u64 = cta[60..].iter().map(|p| p.total_clicks).sum();
        let previous: u64 = cta[30..60].iter().map(|p| p.total_clicks).sum();
        assert_eq!(mv.raw, current as f64);
        assert_eq!(mv.previous_value, previous as f64);
        let expected = ((current as f64 - previous as f64) / previous as f64 * 100.0).round();
        assert_eq!(mv.change, Some(expected as i64));
    }

    #[test]
    fn change_is_none_when_previous_period_is_empty() {
        let svc = service();
        let first = svc.dataset().traffic[0].date;
        for key in MetricKey::ALL {
            let mv = svc
                .get_metric_value(
                    key.as_str(),
                    DateRange::between(first, first + Duration::days(6)),
                    DateRange::trailing(),
                )
                .unwrap();
            assert_eq!(mv.previous_value, 0.0, "{}", key.as_str());
            assert_eq!(mv.change, None, "{}", key.as_str());
            assert!(mv.raw.is_finite());
        }
    }

    #[test]
    fn explicit_compare_window_is_used() {
        let svc = service();
        let cur = DateRange::between(anchor() - Duration::days(6), anchor());
        let cmp = DateRange::between(anchor() - Duration::days(13), anchor() - Duration::days(7));
        let explicit = svc.get_metric_value("totalImpressions", cur, cmp).unwrap();
        let implicit = svc
            .get_metric_value("totalImpressions", cur, DateRange::trailing())
            .unwrap();
        assert_eq!(explicit, implicit);

        let other = DateRange::between(anchor() - Duration::days(60), anchor() - Duration::days(54));
        let shifted = svc.get_metric_value("totalImpressions", cur, other).unwrap();
        assert_ne!(shifted.previous_value, implicit.previous_value);
    }

    #[test]
    fn formatted_values_by_kind() {
        let svc = service();
        let ctr = svc
            .get_metric_value("avgCtr", DateRange::trailing(), DateRange::trailing())
            .unwrap();
        assert!(ctr.value.ends_with('%'));
        let pipeline = svc
            .get_metric_value("pipelineValue", DateRange::trailing(), DateRange::trailing())
            .unwrap();
        assert!(pipeline.value.starts_with('$'));
    }

    #[test]
    fn leads_metric_counts_created_in_window() {
        let svc = service();
        let mv = svc
            .get_metric_value("leads", DateRange::trailing(), DateRange::trailing())
            .unwrap();
        let window_start = svc.dataset().traffic[60].date;
        let expected = svc
            .dataset()
            .leads
            .iter()
            .filter(|l| l.created_at >= window_start && l.created_at <= anchor())
            .count();
        assert_eq!(mv.raw, expected as f64);
    }

    #[test]
    fn unknown_keys_are_empty() {
        let svc = service();
        assert!(svc.get_chart_data("bounceRate", DateRange::trailing()).is_empty());
        assert!(
            svc.get_metric_value("bounceRate", DateRange::trailing(), DateRange::trailing())
                .is_none()
        );
    }

    #[test]
    fn chart_data_uses_trailing_default() {
        let svc = service();
        let pts = svc.get_chart_data("chatgpt", DateRange::trailing());
        assert_eq!(pts.len(), 30);
        assert_eq!(pts.last().unwrap().date, anchor());
        let all = svc.get_chart_data(
            "clicks",
            DateRange::between(svc.dataset().traffic[0].date, anchor()),
        );
        assert_eq!(all.len(), 90);
    }

    #[test]
    fn find_page_misses_cleanly() {
        let svc = service();
        assert!(svc.find_page(1).is_some());
        assert!(svc.find_page(999).is_none());
    }
}
