//! Recognised data keys. Callers pass plain strings; unknown strings map to `None`
//! and the metrics service answers with an empty result.

use super::entities::AiEngine;

/// Series that can be charted day by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKey {
    Clicks,
    Impressions,
    Ctr,
    Position,
    Citations,
    Appearances,
    Engine(AiEngine),
    CtaClicks,
}

impl ChartKey {
    pub fn parse(key: &str) -> Option<Self> {
        let parsed = match key {
            "clicks" => ChartKey::Clicks,
            "impressions" => ChartKey::Impressions,
            "ctr" => ChartKey::Ctr,
            "position" => ChartKey::Position,
            "citations" => ChartKey::Citations,
            "appearances" => ChartKey::Appearances,
            "chatgpt" => ChartKey::Engine(AiEngine::ChatGpt),
            "perplexity" => ChartKey::Engine(AiEngine::Perplexity),
            "gemini" => ChartKey::Engine(AiEngine::Gemini),
            "claude" => ChartKey::Engine(AiEngine::Claude),
            "copilot" => ChartKey::Engine(AiEngine::Copilot),
            "aiOverviews" => ChartKey::Engine(AiEngine::AiOverviews),
            "ctaClicks" => ChartKey::CtaClicks,
            _ => return None,
        };
        Some(parsed)
    }
}

/// Metric cards: a value over a window plus its change against the previous window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    TotalClicks,
    TotalImpressions,
    AvgCtr,
    AvgPosition,
    AiCitations,
    AiAppearances,
    CtaClicks,
    Leads,
    PipelineValue,
}

impl MetricKey {
    pub const ALL: [MetricKey; 9] = [
        MetricKey::TotalClicks,
        MetricKey::TotalImpressions,
        MetricKey::AvgCtr,
        MetricKey::AvgPosition,
        MetricKey::AiCitations,
        MetricKey::AiAppearances,
        MetricKey::CtaClicks,
        MetricKey::Leads,
        MetricKey::PipelineValue,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::TotalClicks => "totalClicks",
            MetricKey::TotalImpressions => "totalImpressions",
            MetricKey::AvgCtr => "avgCtr",
            MetricKey::AvgPosition => "avgPosition",
            MetricKey::AiCitations => "aiCitations",
            MetricKey::AiAppearances => "aiAppearances",
            MetricKey::CtaClicks => "ctaClicks",
            MetricKey::Leads => "leads",
            MetricKey::PipelineValue => "pipelineValue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::TotalClicks => "Organic clicks",
            MetricKey::TotalImpressions => "Impressions",
            MetricKey::AvgCtr => "Average CTR",
            MetricKey::AvgPosition => "Average position",
            MetricKey::AiCitations => "AI citations",
            MetricKey::AiAppearances => "AI appearances",
            MetricKey::CtaClicks => "CTA clicks",
            MetricKey::Leads => "Leads captured",
            MetricKey::PipelineValue => "Pipeline value",
        }
    }
}
