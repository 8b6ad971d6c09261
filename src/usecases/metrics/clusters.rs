//! Category clusters: rollups, per-page classification and top movers.

use super::MetricsService;
use super::format::{mean, percent_change, ratio, round_to};
use crate::domain::{ClusterPage, ClusterSummary, DateRange, LeadStatus, Page, PageStatus, TopMovers};
use std::collections::BTreeMap;
use tracing::debug;

/// Clicks below this fraction of the cluster average count as "low".
const LOW_CLICKS_RATIO: f64 = 0.4;
/// CTR below this fraction of the cluster average counts as "low".
const LOW_CTR_RATIO: f64 = 0.7;
/// Click change (percent) below which a page is declining.
const DECLINE_THRESHOLD: f64 = -10.0;
/// Click change (percent) above which a page is growing.
const GROWTH_THRESHOLD: f64 = 5.0;
const TOP_MOVERS: usize = 5;

/// The inputs classification looks at for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSnapshot {
    pub clicks: u64,
    pub impressions: u64,
    pub ctr: f64,
    pub click_change: Option<f64>,
}

/// Cluster-wide means the classification compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterAverages {
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
}

/// Decision tree, evaluated in order:
/// 1. low clicks, some impressions and CTR under 70% of average: underperforming
/// 2. clicks down more than 10%, or above-average impressions with CTR under 70%: attention
/// 3. CTR at or above average and clicks up more than 5%: performing
/// 4. low clicks: underperforming
/// 5. performing
///
/// A missing change counts as zero.
pub fn classify_page(page: &PageSnapshot, avg: &ClusterAverages) -> (PageStatus, String) {
    let change = page.click_change.unwrap_or(0.0);
    let clicks = page.clicks as f64;
    let low_clicks = clicks < avg.clicks * LOW_CLICKS_RATIO;
    let low_ctr = page.ctr < avg.ctr * LOW_CTR_RATIO;

    if low_clicks && page.impressions > 0 && low_ctr {
        return (
            PageStatus::Underperforming,
            format!(
                "Visible in search but rarely clicked: CTR {:.2}% vs {:.2}% cluster average",
                page.ctr, avg.ctr
            ),
        );
    }
    if change < DECLINE_THRESHOLD {
        return (
            PageStatus::Attention,
            format!("Clicks down {:.1}% on the previous period", change.abs()),
        );
    }
    if page.impressions as f64 >= avg.impressions && low_ctr {
        return (
            PageStatus::Attention,
            format!(
                "High impressions with weak CTR ({:.2}%); title and meta need work",
                page.ctr
            ),
        );
    }
    if page.ctr >= avg.ctr && change > GROWTH_THRESHOLD {
        return (
            PageStatus::Performing,
            format!("CTR above average and clicks up {:.1}%", change),
        );
    }
    if low_clicks {
        return (
            PageStatus::Underperforming,
            "Clicks well below the cluster average".to_string(),
        );
    }
    (PageStatus::Performing, "Holding steady".to_string())
}

impl MetricsService {
    /// One summary per category, sorted by total clicks descending.
    pub fn get_cluster_data(&self, range: DateRange) -> Vec<ClusterSummary> {
        let mut summaries: Vec<ClusterSummary> = self
            .pages_by_category()
            .into_iter()
            .map(|(category, pages)| self.summarize_cluster(category, &pages, range))
            .collect();
        summaries.sort_by(|a, b| b.total_clicks.cmp(&a.total_clicks));
        summaries
    }

    fn summarize_cluster(&self, category: &str, pages: &[&Page], range: DateRange) -> ClusterSummary {
        let (mut clicks, mut impressions) = (0u64, 0u64);
        let (mut leads, mut converted, mut pipeline) = (0usize, 0usize, 0.0f64);
        for page in pages {
            let (c, i) = self.page_totals(page.id, range);
            clicks += c;
            impressions += i;
            for lead in self.leads_for_url(&page.url) {
                leads += 1;
                if lead.status == LeadStatus::Converted {
                    converted += 1;
                }
                if lead.status != LeadStatus::Lost {
                    pipeline += lead.value;
                }
            }
        }
        ClusterSummary {
            category: category.to_string(),
            page_count: pages.len(),
            total_clicks: clicks,
            total_impressions: impressions,
            ctr: round_to(ratio(clicks as f64, impressions as f64) * 100.0, 2),
            avg_clicks_per_page: round_to(ratio(clicks as f64, pages.len() as f64), 1),
            leads,
            converted_leads: converted,
            pipeline_value: pipeline,
        }
    }

    /// Pages of `category` with deltas against the previous period and their status,
    /// sorted by clicks descending. Unknown categories yield an empty list.
    pub fn get_cluster_pages(&self, category: &str, range: DateRange) -> Vec<ClusterPage> {
        let pages: Vec<&Page> = self
            .dataset()
            .pages
            .iter()
            .filter(|p| p.category == category)
            .collect();
        if pages.is_empty() {
            return Vec::new();
        }

        let rows: Vec<(&Page, (u64, u64), (u64, u64))> = pages
            .iter()
            .map(|p| {
                (
                    *p,
                    self.page_totals(p.id, range),
                    self.page_previous_totals(p.id, range),
                )
            })
            .collect();

        let ctrs: Vec<f64> = rows.iter().map(|(_, (c, i), _)| page_ctr(*c, *i)).collect();
        let avg = ClusterAverages {
            clicks: mean(&rows.iter().map(|(_, (c, _), _)| *c as f64).collect::<Vec<_>>()),
            impressions: mean(&rows.iter().map(|(_, (_, i), _)| *i as f64).collect::<Vec<_>>()),
            ctr: mean(&ctrs),
        };

        let mut out: Vec<ClusterPage> = rows
            .into_iter()
            .map(|(page, (clicks, impressions), (prev_clicks, prev_impressions))| {
                let click_change =
                    percent_change(clicks as f64, prev_clicks as f64).map(|c| round_to(c, 1));
                let impression_change = percent_change(impressions as f64, prev_impressions as f64)
                    .map(|c| round_to(c, 1));
                let snapshot = PageSnapshot {
                    clicks,
                    impressions,
                    ctr: page_ctr(clicks, impressions),
                    click_change,
                };
                let (status, reason) = classify_page(&snapshot, &avg);
                ClusterPage {
                    page: page.clone(),
                    clicks,
                    impressions,
                    ctr: snapshot.ctr,
                    previous_clicks: prev_clicks,
                    previous_impressions: prev_impressions,
                    click_change,
                    impression_change,
                    status,
                    reason,
                }
            })
            .collect();
        out.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        debug!(category, pages = out.len(), "classified cluster pages");
        out
    }

    /// Largest click gains and losses across every cluster.
    pub fn get_top_movers(&self, range: DateRange) -> TopMovers {
        let all: Vec<ClusterPage> = self
            .pages_by_category()
            .into_keys()
            .flat_map(|category| self.get_cluster_pages(category, range))
            .collect();

        let mut rising: Vec<ClusterPage> = all
            .iter()
            .filter(|p| p.click_change.is_some_and(|c| c > 0.0))
            .cloned()
            .collect();
        rising.sort_by(|a, b| change_of(b).total_cmp(&change_of(a)));
        rising.truncate(TOP_MOVERS);

        let mut falling: Vec<ClusterPage> = all
            .into_iter()
            .filter(|p| p.click_change.is_some_and(|c| c < 0.0))
            .collect();
        falling.sort_by(|a, b| change_of(a).total_cmp(&change_of(b)));
        falling.truncate(TOP_MOVERS);

        TopMovers { rising, falling }
    }

    /// Pages grouped by category; categories in alphabetical order.
    pub(crate) fn pages_by_category(&self) -> BTreeMap<&str, Vec<&Page>> {
        let mut map: BTreeMap<&str, Vec<&Page>> = BTreeMap::new();
        for page in &self.dataset().pages {
            map.entry(page.category.as_str()).or_default().push(page);
        }
        map
    }
}

fn page_ctr(clicks: u64, impressions: u64) -> f64 {
    round_to(ratio(clicks as f64, impressions as f64) * 100.0, 2)
}

fn change_of(p: &ClusterPage) -> f64 {
    p.click_change.unwrap_or(0.0)
}
