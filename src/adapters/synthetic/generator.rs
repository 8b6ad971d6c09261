//! Synthetic dataset generator.
//!
//! Each daily series is a linear growth term plus trigonometric noise, damped on
//! weekends and floored at zero. Random bands come from a seeded `StdRng`, so the
//! same seed and anchor always produce the same dataset.

use crate::domain::catalog::{self, LANDING_PAGES, LEADS, PAGES};
use crate::domain::{
    AiEngine, DailyAiPoint, DailyCtaPoint, DailyTrafficPoint, Dataset, Lead, Page,
    PageDailyPoint, TrafficProfile,
};
use crate::shared::numeric::round_to;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::info;

const TRAFFIC_WEEKEND_FACTOR: f64 = 0.6;
const AI_WEEKEND_FACTOR: f64 = 0.7;
const CTA_WEEKEND_FACTOR: f64 = 0.55;

/// Builds a [`Dataset`] of `days` trailing daily points ending on `anchor`.
pub struct SyntheticGenerator {
    seed: u64,
    anchor: NaiveDate,
    days: usize,
}

impl SyntheticGenerator {
    pub fn new(seed: u64, anchor: NaiveDate, days: usize) -> Self {
        Self { seed, anchor, days }
    }

    pub fn generate(&self) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dates: Vec<NaiveDate> = (0..self.days)
            .map(|i| self.anchor - Duration::days((self.days - 1 - i) as i64))
            .collect();

        let traffic = generate_traffic(&dates, &mut rng);
        let ai = generate_ai(&dates, &mut rng);
        let cta = generate_cta(&dates);
        let pages = build_pages(self.anchor);
        let page_series = pages
            .iter()
            .map(|p| (p.id, page_series(p, &traffic)))
            .collect();
        let leads = build_leads(self.anchor);

        info!(
            seed = self.seed,
            anchor = %self.anchor,
            days = self.days,
            pages = pages.len(),
            leads = leads.len(),
            "synthetic dataset generated"
        );

        Dataset {
            anchor: self.anchor,
            traffic,
            ai,
            cta,
            pages,
            page_series,
            leads,
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn weekend_damped(date: NaiveDate, value: f64, factor: f64) -> f64 {
    let v = if is_weekend(date) { value * factor } else { value };
    v.max(0.0)
}

fn to_count(v: f64) -> u64 {
    v.round().max(0.0) as u64
}

fn generate_traffic(dates: &[NaiveDate], rng: &mut StdRng) -> Vec<DailyTrafficPoint> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let x = i as f64;
            let base = 420.0 + x * 3.2 + (x * 0.45).sin() * 60.0 + (x * 0.17).cos() * 35.0;
            let clicks = to_count(weekend_damped(date, base, TRAFFIC_WEEKEND_FACTOR));
            let impressions = to_count(clicks as f64 * rng.gen_range(18.0..26.0));
            let ctr = if impressions > 0 {
                round_to(clicks as f64 / impressions as f64 * 100.0, 2)
            } else {
                0.0
            };
            let position = (14.0 - x * 0.06 + (x * 0.3).sin() * 0.8).max(1.0);
            DailyTrafficPoint {
                date,
                clicks,
                impressions,
                ctr,
                avg_position: round_to(position, 1),
            }
        })
        .collect()
}

fn generate_ai(dates: &[NaiveDate], rng: &mut StdRng) -> Vec<DailyAiPoint> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let x = i as f64;
            let base = weekend_damped(
                date,
                80.0 + x * 1.1 + (x * 0.6).sin() * 12.0,
                AI_WEEKEND_FACTOR,
            );
            let mut engines = [0u64; 6];
            for engine in AiEngine::ALL {
                let jitter = rng.gen_range(0.95..1.05);
                engines[engine.index()] = to_count(base * engine.volume_share() * jitter);
            }
            let citations: u64 = engines.iter().sum();
            let appearances = to_count(citations as f64 * rng.gen_range(1.6..2.2));
            DailyAiPoint {
                date,
                citations,
                appearances,
                engines,
            }
        })
        .collect()
}

fn generate_cta(dates: &[NaiveDate]) -> Vec<DailyCtaPoint> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let x = i as f64;
            let base = 28.0 + x * 0.25 + (x * 0.5).cos() * 6.0;
            let total = to_count(weekend_damped(date, base, CTA_WEEKEND_FACTOR));
            let per_landing_page = split_by_weight(total);
            DailyCtaPoint {
                date,
                total_clicks: per_landing_page.values().sum(),
                per_landing_page,
            }
        })
        .collect()
}

/// Floors each landing page's weighted share; the remainder goes to the first landing page.
fn split_by_weight(total: u64) -> BTreeMap<String, u64> {
    let mut out = BTreeMap::new();
    let mut assigned = 0u64;
    for (slug, weight) in LANDING_PAGES {
        let n = (total as f64 * weight).floor() as u64;
        assigned += n;
        out.insert(catalog::page_url(slug), n);
    }
    if let Some((first, _)) = LANDING_PAGES.first() {
        *out.entry(catalog::page_url(first)).or_insert(0) += total.saturating_sub(assigned);
    }
    out
}

fn build_pages(anchor: NaiveDate) -> Vec<Page> {
    PAGES
        .iter()
        .map(|seed| Page {
            id: seed.id,
            url: catalog::page_url(seed.slug),
            title: seed.title.to_string(),
            category: seed.category.to_string(),
            publish_date: anchor - Duration::days(seed.published_days_ago),
            author: seed.author.to_string(),
            profile: TrafficProfile {
                share: seed.share,
                impression_factor: seed.impression_factor,
                trend: seed.trend,
            },
        })
        .collect()
}

/// A page's daily series: its share of site traffic, drifted linearly by its trend.
/// Days before publication are zero.
fn page_series(page: &Page, traffic: &[DailyTrafficPoint]) -> Vec<PageDailyPoint> {
    let span = traffic.len().saturating_sub(1).max(1) as f64;
    let profile = page.profile;
    traffic
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if t.date < page.publish_date {
                return PageDailyPoint {
                    date: t.date,
                    clicks: 0,
                    impressions: 0,
                };
            }
            let drift = (1.0 + profile.trend * (i as f64 / span - 0.5)).max(0.0);
            let clicks = to_count(t.clicks as f64 * profile.share * drift);
            let impressions = to_count(
                t.impressions as f64 * profile.share * profile.impression_factor * drift,
            );
            PageDailyPoint {
                date: t.date,
                clicks,
                impressions: impressions.max(clicks),
            }
        })
        .collect()
}

fn build_leads(anchor: NaiveDate) -> Vec<Lead> {
    LEADS
        .iter()
        .map(|seed| Lead {
            id: seed.id,
            name: seed.name.to_string(),
            email: seed.email.to_string(),
            company: seed.company.to_string(),
            job_title: seed.job_title.to_string(),
            industry: seed.industry.to_string(),
            source_url: catalog::page_url(seed.source),
            status: seed.status,
            value: seed.value,
            created_at: anchor - Duration::days(seed.created_days_ago),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = SyntheticGenerator::new(7, anchor(), 90).generate();
        let b = SyntheticGenerator::new(7, anchor(), 90).generate();
        assert_eq!(a.traffic, b.traffic);
        assert_eq!(a.ai, b.ai);
        assert_eq!(a.cta, b.cta);
        assert_eq!(a.page_series, b.page_series);

        let c = SyntheticGenerator::new(8, anchor(), 90).generate();
        assert_ne!(a.traffic, c.traffic);
    }

    #[test]
    fn series_cover_trailing_window_ending_on_anchor() {
        let ds = SyntheticGenerator::new(1, anchor(), 90).generate();
        assert_eq!(ds.traffic.len(), 90);
        assert_eq!(ds.ai.len(), 90);
        assert_eq!(ds.cta.len(), 90);
        assert_eq!(ds.traffic.last().unwrap().date, anchor());
        assert_eq!(
            ds.traffic.first().unwrap().date,
            anchor() - Duration::days(89)
        );
        assert!(ds.traffic.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn weekends_are_damped() {
        let ds = SyntheticGenerator::new(3, anchor(), 90).generate();
        let weekday_avg = avg(ds.traffic.iter().filter(|p| !is_weekend(p.date)));
        let weekend_avg = avg(ds.traffic.iter().filter(|p| is_weekend(p.date)));
        assert!(weekend_avg < weekday_avg * 0.8);
    }

    fn avg<'a>(points: impl Iterator<Item = &'a DailyTrafficPoint>) -> f64 {
        let v: Vec<u64> = points.map(|p| p.clicks).collect();
        v.iter().sum::<u64>() as f64 / v.len() as f64
    }

    #[test]
    fn derived_traffic_fields_are_consistent() {
        let ds = SyntheticGenerator::new(5, anchor(), 90).generate();
        for p in &ds.traffic {
            assert!(p.impressions >= p.clicks * 18);
            assert!(p.ctr.is_finite());
            assert!(p.avg_position >= 1.0);
        }
        let first = ds.traffic.first().unwrap().avg_position;
        let last = ds.traffic.last().unwrap().avg_position;
        assert!(last < first);
    }

    #[test]
    fn dominant_engine_leads_every_day() {
        let ds = SyntheticGenerator::new(11, anchor(), 90).generate();
        for p in &ds.ai {
            for pair in AiEngine::ALL.windows(2) {
                assert!(p.engine(pair[0]) >= p.engine(pair[1]), "{}", p.date);
            }
            assert_eq!(p.citations, p.engines.iter().sum::<u64>());
            assert!(p.appearances >= p.citations);
        }
    }

    #[test]
    fn cta_split_sums_to_total() {
        let ds = SyntheticGenerator::new(2, anchor(), 90).generate();
        for p in &ds.cta {
            assert_eq!(p.total_clicks, p.per_landing_page.values().sum::<u64>());
            assert_eq!(p.per_landing_page.len(), LANDING_PAGES.len());
        }
    }

    #[test]
    fn unpublished_days_are_zero() {
        let ds = SyntheticGenerator::new(2, anchor(), 90).generate();
        let page = ds.pages.iter().find(|p| p.id == 11).unwrap();
        let series = &ds.page_series[&page.id];
        assert!(
            series
                .iter()
                .filter(|p| p.date < page.publish_date)
                .all(|p| p.clicks == 0 && p.impressions == 0)
        );
        assert!(series.last().unwrap().clicks > 0);
    }

    #[test]
    fn lead_dates_follow_anchor() {
        let ds = SyntheticGenerator::new(2, anchor(), 90).generate();
        assert_eq!(ds.leads.len(), LEADS.len());
        assert!(ds.leads.iter().all(|l| l.created_at <= anchor()));
    }

    #[test]
    fn zero_days_is_empty() {
        let ds = SyntheticGenerator::new(2, anchor(), 0).generate();
        assert!(ds.traffic.is_empty());
        assert!(ds.page_series.values().all(|s| s.is_empty()));
    }
}
