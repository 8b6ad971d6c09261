//! Domain entities. Pure data structures for the core business.
//!
//! Everything here is generated once into a [`Dataset`] and read-only afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of organic search performance for the whole site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrafficPoint {
    pub date: NaiveDate,
    pub clicks: u64,
    pub impressions: u64,
    /// Click-through rate in percent.
    pub ctr: f64,
    pub avg_position: f64,
}

/// AI answer engines that cite site content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiEngine {
    ChatGpt,
    Perplexity,
    Gemini,
    Claude,
    Copilot,
    AiOverviews,
}

impl AiEngine {
    /// All engines, dominant first.
    pub const ALL: [AiEngine; 6] = [
        AiEngine::ChatGpt,
        AiEngine::Perplexity,
        AiEngine::Gemini,
        AiEngine::Claude,
        AiEngine::Copilot,
        AiEngine::AiOverviews,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AiEngine::ChatGpt => "ChatGPT",
            AiEngine::Perplexity => "Perplexity",
            AiEngine::Gemini => "Gemini",
            AiEngine::Claude => "Claude",
            AiEngine::Copilot => "Copilot",
            AiEngine::AiOverviews => "AI Overviews",
        }
    }

    /// Position in [`AiEngine::ALL`]; also the index into [`DailyAiPoint::engines`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Share of daily citation volume. Strictly decreasing along [`AiEngine::ALL`].
    pub fn volume_share(self) -> f64 {
        match self {
            AiEngine::ChatGpt => 0.38,
            AiEngine::Perplexity => 0.22,
            AiEngine::Gemini => 0.16,
            AiEngine::Claude => 0.12,
            AiEngine::Copilot => 0.08,
            AiEngine::AiOverviews => 0.04,
        }
    }
}

impl std::fmt::Display for AiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of AI-engine citation activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAiPoint {
    pub date: NaiveDate,
    pub citations: u64,
    pub appearances: u64,
    /// Per-engine citations, indexed by [`AiEngine::index`].
    pub engines: [u64; 6],
}

impl DailyAiPoint {
    pub fn engine(&self, engine: AiEngine) -> u64 {
        self.engines[engine.index()]
    }
}

/// One day of call-to-action clicks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCtaPoint {
    pub date: NaiveDate,
    pub total_clicks: u64,
    /// Landing page URL -> clicks. Sums to `total_clicks`.
    pub per_landing_page: BTreeMap<String, u64>,
}

/// One day of organic search performance for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDailyPoint {
    pub date: NaiveDate,
    pub clicks: u64,
    pub impressions: u64,
}

/// How a page's traffic is derived from the site series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficProfile {
    /// Fraction of site clicks landing on this page.
    pub share: f64,
    /// Multiplier on the page's share of site impressions. Above 1 means weaker CTR.
    pub impression_factor: f64,
    /// Linear drift over the window: positive grows, negative declines.
    pub trend: f64,
}

/// A content article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: u32,
    pub url: String,
    pub title: String,
    pub category: String,
    pub publish_date: NaiveDate,
    pub author: String,
    pub profile: TrafficProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }
}

/// An identified visitor / sales lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub industry: String,
    /// Page URL the lead converted on. Matched to [`Page::url`] by exact equality.
    pub source_url: String,
    pub status: LeadStatus,
    pub value: f64,
    pub created_at: NaiveDate,
}

/// Everything the metrics engine reads. Built once by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Last day of every series.
    pub anchor: NaiveDate,
    pub traffic: Vec<DailyTrafficPoint>,
    pub ai: Vec<DailyAiPoint>,
    pub cta: Vec<DailyCtaPoint>,
    pub pages: Vec<Page>,
    /// Page id -> daily series aligned with `traffic`.
    pub page_series: BTreeMap<u32, Vec<PageDailyPoint>>,
    pub leads: Vec<Lead>,
}
