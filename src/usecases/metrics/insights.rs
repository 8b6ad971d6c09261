//! Content production priorities per cluster.

use super::MetricsService;
use super::format::{format_count, median};
use crate::domain::{ClusterSummary, DateRange, Priority, ProductionInsight};

/// Clusters this small are candidates for expansion.
const SMALL_CLUSTER_PAGES: usize = 3;

/// Cross-cluster medians. Comparisons against them are inclusive (`>=`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMedians {
    pub total_clicks: f64,
    pub total_impressions: f64,
    pub avg_clicks_per_page: f64,
    pub ctr: f64,
}

impl ClusterMedians {
    pub fn of(clusters: &[ClusterSummary]) -> Self {
        let col = |f: fn(&ClusterSummary) -> f64| -> f64 {
            median(&clusters.iter().map(f).collect::<Vec<_>>())
        };
        Self {
            total_clicks: col(|c| c.total_clicks as f64),
            total_impressions: col(|c| c.total_impressions as f64),
            avg_clicks_per_page: col(|c| c.avg_clicks_per_page),
            ctr: col(|c| c.ctr),
        }
    }
}

/// Priority decision tree:
/// - double down: clicks and clicks-per-page at or above median, with leads
/// - optimize first: impressions at or above median and either CTR below median,
///   or high clicks without a single lead
/// - expand: small cluster with clicks-per-page at or above median
/// - monitor: everything else
pub fn assign_priority(c: &ClusterSummary, m: &ClusterMedians) -> Priority {
    let high_volume = c.total_clicks as f64 >= m.total_clicks;
    let high_efficiency = c.avg_clicks_per_page >= m.avg_clicks_per_page;
    let high_impressions = c.total_impressions as f64 >= m.total_impressions;
    let high_ctr = c.ctr >= m.ctr;
    let has_leads = c.leads > 0;

    if high_volume && high_efficiency && has_leads {
        Priority::DoubleDown
    } else if high_impressions && (!high_ctr || (high_volume && !has_leads)) {
        Priority::OptimizeFirst
    } else if c.page_count <= SMALL_CLUSTER_PAGES && high_efficiency {
        Priority::Expand
    } else {
        Priority::Monitor
    }
}

fn rationale(priority: Priority, c: &ClusterSummary, m: &ClusterMedians) -> String {
    match priority {
        Priority::DoubleDown => format!(
            "{} drives {} clicks across {} pages ({:.1} per page vs {:.1} median) and has produced {} leads.",
            c.category,
            format_count(c.total_clicks),
            c.page_count,
            c.avg_clicks_per_page,
            m.avg_clicks_per_page,
            c.leads
        ),
        Priority::OptimizeFirst => format!(
            "{} earns {} impressions but converts them at {:.2}% CTR (median {:.2}%) with {} leads.",
            c.category,
            format_count(c.total_impressions),
            c.ctr,
            m.ctr,
            c.leads
        ),
        Priority::Expand => format!(
            "{} has only {} pages yet averages {:.1} clicks per page (median {:.1}).",
            c.category, c.page_count, c.avg_clicks_per_page, m.avg_clicks_per_page
        ),
        Priority::Monitor => format!(
            "{} sits below median on volume ({} clicks) and efficiency ({:.1} per page).",
            c.category,
            format_count(c.total_clicks),
            c.avg_clicks_per_page
        ),
    }
}

fn actions(priority: Priority) -> Vec<String> {
    let list: &[&str] = match priority {
        Priority::DoubleDown => &[
            "Publish 2-3 supporting articles on adjacent keywords",
            "Add CTAs to the top pages to capture more leads",
            "Refresh the pillar page with new data",
        ],
        Priority::OptimizeFirst => &[
            "Rewrite titles and meta descriptions for the highest-impression pages",
            "Add FAQ sections to target featured snippets",
            "Review search intent before publishing anything new",
        ],
        Priority::Expand => &[
            "Build out the cluster with a pillar page",
            "Cover the next 3-5 related questions searchers ask",
        ],
        Priority::Monitor => &[
            "Track rankings monthly",
            "Revisit once higher-priority clusters are addressed",
        ],
    };
    list.iter().map(|s| s.to_string()).collect()
}

impl MetricsService {
    /// One insight per cluster, ordered double down, expand, optimize first, monitor.
    /// Within a priority, clusters keep their clicks-descending order.
    pub fn get_content_production_insights(&self, range: DateRange) -> Vec<ProductionInsight> {
        let clusters = self.get_cluster_data(range);
        let medians = ClusterMedians::of(&clusters);
        let mut insights: Vec<ProductionInsight> = clusters
            .into_iter()
            .map(|summary| {
                let priority = assign_priority(&summary, &medians);
                ProductionInsight {
                    category: summary.category.clone(),
                    priority,
                    label: priority.label().to_string(),
                    rationale: rationale(priority, &summary, &medians),
                    actions: actions(priority),
                    summary,
                }
            })
            .collect();
        insights.sort_by_key(|i| i.priority.rank());
        insights
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service;
    use super::*;

    fn cluster(
        category: &str,
        pages: usize,
        clicks: u64,
        impressions: u64,
        ctr: f64,
        leads: usize,
    ) -> ClusterSummary {
        ClusterSummary {
            category: category.to_string(),
            page_count: pages,
            total_clicks: clicks,
            total_impressions: impressions,
            ctr,
            avg_clicks_per_page: clicks as f64 / pages as f64,
            leads,
            converted_leads: 0,
            pipeline_value: 0.0,
        }
    }

    fn medians() -> ClusterMedians {
        ClusterMedians {
            total_clicks: 1000.0,
            total_impressions: 20000.0,
            avg_clicks_per_page: 250.0,
            ctr: 5.0,
        }
    }

    #[test]
    fn exactly_median_counts_as_above() {
        let c = cluster("A", 4, 1000, 20000, 5.0, 1);
        assert_eq!(assign_priority(&c, &medians()), Priority::DoubleDown);
    }

    #[test]
    fn high_impressions_low_ctr_optimizes_first() {
        let c = cluster("B", 8, 900, 30000, 3.0, 2);
        assert_eq!(assign_priority(&c, &medians()), Priority::OptimizeFirst);
    }

    #[test]
    fn high_volume_without_leads_optimizes_first() {
        let c = cluster("C", 4, 1200, 20000, 6.0, 0);
        assert_eq!(assign_priority(&c, &medians()), Priority::OptimizeFirst);
    }

    #[test]
    fn small_efficient_cluster_expands() {
        let c = cluster("D", 2, 600, 8000, 7.5, 0);
        assert_eq!(assign_priority(&c, &medians()), Priority::Expand);
    }

    #[test]
    fn everything_else_is_monitored() {
        let c = cluster("E", 5, 400, 9000, 4.4, 1);
        assert_eq!(assign_priority(&c, &medians()), Priority::Monitor);
    }

    #[test]
    fn medians_use_middle_values() {
        let clusters = vec![
            cluster("A", 1, 100, 1000, 1.0, 0),
            cluster("B", 1, 300, 3000, 3.0, 0),
            cluster("C", 1, 200, 2000, 2.0, 0),
            cluster("D", 1, 1000, 10000, 9.0, 0),
        ];
        let m = ClusterMedians::of(&clusters);
        assert_eq!(m.total_clicks, 250.0);
        assert_eq!(m.total_impressions, 2500.0);
        assert_eq!(m.ctr, 2.5);
    }

    #[test]
    fn insights_follow_fixed_priority_order() {
        let insights = service().get_content_production_insights(DateRange::trailing());
        assert_eq!(insights.len(), 6);
        assert!(insights.windows(2).all(|w| w[0].priority.rank() <= w[1].priority.rank()));
        for insight in &insights {
            assert_eq!(insight.label, insight.priority.label());
            assert!(insight.rationale.contains(&insight.category));
            assert!(!insight.actions.is_empty());
        }
    }
}
