//! Derived analytics. Computed on demand by the metrics service, never stored.

use super::entities::Page;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of a chartable series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A metric card value with its period-over-period change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Display string ("12,345", "3.42%", "8.1", "$48,000").
    pub value: String,
    /// Unformatted current value.
    pub raw: f64,
    /// Whole-percent change. `None` when the previous period totals zero.
    pub change: Option<i64>,
    pub previous_value: f64,
}

/// Pages of one category rolled up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub category: String,
    pub page_count: usize,
    pub total_clicks: u64,
    pub total_impressions: u64,
    /// Percent, two decimals.
    pub ctr: f64,
    pub avg_clicks_per_page: f64,
    pub leads: usize,
    pub converted_leads: usize,
    pub pipeline_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Performing,
    Attention,
    Underperforming,
}

impl PageStatus {
    pub fn label(self) -> &'static str {
        match self {
            PageStatus::Performing => "performing",
            PageStatus::Attention => "needs attention",
            PageStatus::Underperforming => "underperforming",
        }
    }
}

/// A page inside a cluster with its deltas and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPage {
    pub page: Page,
    pub clicks: u64,
    pub impressions: u64,
    pub ctr: f64,
    pub previous_clicks: u64,
    pub previous_impressions: u64,
    /// Click change in percent, one decimal. `None` when the previous period had no clicks.
    pub click_change: Option<f64>,
    pub impression_change: Option<f64>,
    pub status: PageStatus,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    DoubleDown,
    OptimizeFirst,
    Expand,
    Monitor,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::DoubleDown => "Double down",
            Priority::OptimizeFirst => "Optimize first",
            Priority::Expand => "Expand",
            Priority::Monitor => "Monitor",
        }
    }

    /// Display order of the insight list.
    pub fn rank(self) -> u8 {
        match self {
            Priority::DoubleDown => 0,
            Priority::Expand => 1,
            Priority::OptimizeFirst => 2,
            Priority::Monitor => 3,
        }
    }
}

/// Recommendation for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionInsight {
    pub category: String,
    pub priority: Priority,
    pub label: String,
    pub rationale: String,
    pub actions: Vec<String>,
    pub summary: ClusterSummary,
}

/// One cluster's contribution to a funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBreakdown {
    pub category: String,
    pub count: u64,
    /// Percent of the stage total, one decimal.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub count: u64,
    /// Percent of the first stage, one decimal.
    pub percentage: f64,
    pub breakdown: Vec<StageBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMovers {
    pub rising: Vec<ClusterPage>,
    pub falling: Vec<ClusterPage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Recent,
    Aging,
    Stale,
}

impl Freshness {
    pub const ALL: [Freshness; 4] = [
        Freshness::Fresh,
        Freshness::Recent,
        Freshness::Aging,
        Freshness::Stale,
    ];

    /// Bucket for a page published `age_days` before the anchor date.
    pub fn for_age(age_days: i64) -> Self {
        match age_days {
            d if d <= 90 => Freshness::Fresh,
            d if d <= 180 => Freshness::Recent,
            d if d <= 365 => Freshness::Aging,
            _ => Freshness::Stale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Freshness::Fresh => "Fresh (0-90 days)",
            Freshness::Recent => "Recent (91-180 days)",
            Freshness::Aging => "Aging (181-365 days)",
            Freshness::Stale => "Stale (1 year+)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessBucket {
    pub bucket: Freshness,
    pub page_count: usize,
    pub total_clicks: u64,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Strong,
    Moderate,
    Weak,
}

impl Coverage {
    pub fn as_str(self) -> &'static str {
        match self {
            Coverage::Strong => "strong",
            Coverage::Moderate => "moderate",
            Coverage::Weak => "weak",
        }
    }
}

/// Lead performance and content coverage for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryIntelligence {
    pub industry: String,
    pub leads: usize,
    pub converted: usize,
    /// Percent, one decimal.
    pub conversion_rate: f64,
    pub pipeline_value: f64,
    pub coverage: Coverage,
    pub suggested_topics: Vec<String>,
}
