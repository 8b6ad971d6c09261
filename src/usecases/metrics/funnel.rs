//! Impressions -> Clicks -> CTA Clicks -> Captured Leads.

use super::MetricsService;
use super::format::{ratio, round_to};
use crate::domain::{DateRange, FunnelStage, StageBreakdown};
use std::collections::BTreeMap;

/// Raw counts are scaled for display so the prototype numbers look like a real site.
pub const DISPLAY_MULTIPLIER: u64 = 50;

const STAGES: [&str; 4] = ["Impressions", "Clicks", "CTA Clicks", "Captured Leads"];

/// One page joined with its CTA clicks and leads.
struct FunnelRow<'a> {
    category: &'a str,
    values: [u64; 4],
}

impl MetricsService {
    pub fn get_content_funnel_data(&self, range: DateRange) -> Vec<FunnelStage> {
        let rows: Vec<FunnelRow<'_>> = self
            .dataset()
            .pages
            .iter()
            .map(|page| {
                let (clicks, impressions) = self.page_totals(page.id, range);
                let cta = self.page_cta_clicks(&page.url, range);
                let leads = self.leads_for_url(&page.url).count() as u64;
                FunnelRow {
                    category: page.category.as_str(),
                    values: [impressions, clicks, cta, leads],
                }
            })
            .collect();

        let mut stages: Vec<FunnelStage> = Vec::with_capacity(STAGES.len());
        for (idx, name) in STAGES.iter().enumerate() {
            let mut by_cluster: BTreeMap<&str, u64> = BTreeMap::new();
            for row in rows.iter().filter(|r| r.values[idx] > 0) {
                *by_cluster.entry(row.category).or_insert(0) += row.values[idx] * DISPLAY_MULTIPLIER;
            }
            let count: u64 = by_cluster.values().sum();

            let mut breakdown: Vec<StageBreakdown> = by_cluster
                .into_iter()
                .map(|(category, n)| StageBreakdown {
                    category: category.to_string(),
                    count: n,
                    share: round_to(ratio(n as f64, count as f64) * 100.0, 1),
                })
                .collect();
            breakdown.sort_by(|a, b| b.count.cmp(&a.count));

            let first = stages.first().map(|s| s.count).unwrap_or(count);
            stages.push(FunnelStage {
                stage: name.to_string(),
                count,
                percentage: round_to(ratio(count as f64, first as f64) * 100.0, 1),
                breakdown,
            });
        }
        stages
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service;
    use super::*;

    #[test]
    fn stages_are_monotonic_and_scaled() {
        let stages = service().get_content_funnel_data(DateRange::trailing());
        assert_eq!(stages.len(), 4);
        assert_eq!(
            stages.iter().map(|s| s.stage.as_str()).collect::<Vec<_>>(),
            STAGES
        );
        assert!(stages.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(stages.iter().all(|s| s.count % DISPLAY_MULTIPLIER == 0));
        assert_eq!(stages[0].percentage, 100.0);
    }

    #[test]
    fn breakdown_sums_to_stage_total() {
        for stage in service().get_content_funnel_data(DateRange::trailing()) {
            let sum: u64 = stage.breakdown.iter().map(|b| b.count).sum();
            assert_eq!(sum, stage.count);
            let shares: f64 = stage.breakdown.iter().map(|b| b.share).sum();
            if stage.count > 0 {
                assert!((shares - 100.0).abs() < 1.0, "{}: {shares}", stage.stage);
            }
        }
    }

    #[test]
    fn captured_leads_only_count_matched_pages() {
        let svc = service();
        let stages = svc.get_content_funnel_data(DateRange::trailing());
        let matched = svc
            .dataset()
            .leads
            .iter()
            .filter(|l| svc.dataset().pages.iter().any(|p| p.url == l.source_url))
            .count() as u64;
        assert_eq!(stages[3].count, matched * DISPLAY_MULTIPLIER);
    }
}
