//! Subagent handlers. Each reads the metrics service and formats a canned reply.
//!
//! Only the cluster-creation pair touches [`SessionState`].

use super::proposals;
use super::router::{Input, extract_cluster_industry};
use crate::domain::{
    AiEngine, ClusterCreated, Coverage, DateRange, Effect, LeadStatus, MetricKey, PageStatus,
    Reply, SessionState,
};
use crate::usecases::metrics::MetricsService;
use crate::usecases::metrics::format::{format_change, format_count, format_currency, ratio};
use std::fmt::Write;

pub type Handler = fn(&MetricsService, &Input, &mut SessionState) -> Reply;

pub const CONFIRM_MESSAGE: &str = "Confirm topic — let's create this cluster.";

fn metric_line(metrics: &MetricsService, key: MetricKey) -> String {
    match metrics.get_metric_value(key.as_str(), DateRange::trailing(), DateRange::trailing()) {
        Some(mv) => format!(
            "- **{}**: {} ({})",
            key.label(),
            mv.value,
            format_change(mv.change.map(|c| c as f64))
        ),
        None => format!("- **{}**: n/a", key.label()),
    }
}

pub fn create_cluster(_: &MetricsService, input: &Input, state: &mut SessionState) -> Reply {
    let industry = extract_cluster_industry(input).unwrap_or_else(|| "General".to_string());
    let industry = proposals::known_industry(&industry)
        .map(str::to_string)
        .unwrap_or(industry);
    let proposal = proposals::proposal_for(&industry);
    let content = format!(
        "Here's a cluster proposal for **{}**:\n\n**{}**\n{}\n\nConfirm and I'll add it to your clusters.",
        proposal.industry, proposal.name, proposal.description
    );
    let suggest = format!("Suggest content topics for the {} industry", proposal.industry);
    state.pending = Some(proposal);
    Reply::text(content)
        .with_action("Confirm topic", CONFIRM_MESSAGE)
        .with_action("Show content gaps", &suggest)
}

pub fn confirm_cluster(metrics: &MetricsService, input: &Input, state: &mut SessionState) -> Reply {
    let Some(proposal) = state.pending.take() else {
        return help(metrics, input, state);
    };
    let content = format!(
        "Done. **{}** is being added to your {} clusters. You'll see it in the cluster list in a moment.",
        proposal.name, proposal.industry
    );
    Reply::text(content)
        .with_action("View clusters", "/clusters")
        .with_effect(Effect::ClusterCreated(ClusterCreated {
            industry: proposal.industry,
            name: proposal.name,
            description: proposal.description,
        }))
}

pub fn traffic_overview(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let mut out = String::from("**Organic performance, last 30 days vs previous 30:**\n\n");
    for key in [
        MetricKey::TotalClicks,
        MetricKey::TotalImpressions,
        MetricKey::AvgCtr,
        MetricKey::AvgPosition,
    ] {
        out.push_str(&metric_line(metrics, key));
        out.push('\n');
    }
    if let Some(top) = metrics.get_cluster_data(DateRange::trailing()).first() {
        let _ = write!(
            out,
            "\nTop cluster: **{}** with {} clicks.",
            top.category,
            format_count(top.total_clicks)
        );
    }
    Reply::text(out)
        .with_action("Show top movers", "/movers")
        .with_action("Cluster breakdown", "/clusters")
}

pub fn ai_citations(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let mut out = String::from("**AI engine visibility, last 30 days:**\n\n");
    out.push_str(&metric_line(metrics, MetricKey::AiCitations));
    out.push('\n');
    out.push_str(&metric_line(metrics, MetricKey::AiAppearances));
    out.push_str("\n\n**By engine:**\n");

    let per_engine: Vec<(AiEngine, f64)> = AiEngine::ALL
        .into_iter()
        .map(|engine| {
            let key = engine_key(engine);
            let total = metrics
                .get_chart_data(key, DateRange::trailing())
                .iter()
                .map(|p| p.value)
                .sum();
            (engine, total)
        })
        .collect();
    let all: f64 = per_engine.iter().map(|(_, v)| v).sum();
    for (engine, total) in &per_engine {
        let _ = writeln!(
            out,
            "- {}: {} ({:.1}%)",
            engine,
            format_count(*total as u64),
            ratio(*total, all) * 100.0
        );
    }
    Reply::text(out).with_action("Which clusters drive this?", "/clusters")
}

fn engine_key(engine: AiEngine) -> &'static str {
    match engine {
        AiEngine::ChatGpt => "chatgpt",
        AiEngine::Perplexity => "perplexity",
        AiEngine::Gemini => "gemini",
        AiEngine::Claude => "claude",
        AiEngine::Copilot => "copilot",
        AiEngine::AiOverviews => "aiOverviews",
    }
}

pub fn cluster_overview(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let clusters = metrics.get_cluster_data(DateRange::trailing());
    if clusters.is_empty() {
        return Reply::text("No content clusters yet.");
    }
    let mut out = String::from("**Content clusters, last 30 days:**\n\n");
    for c in &clusters {
        let _ = writeln!(
            out,
            "- **{}**: {} pages, {} clicks, {:.2}% CTR, {} leads ({} converted)",
            c.category,
            c.page_count,
            format_count(c.total_clicks),
            c.ctr,
            c.leads,
            c.converted_leads
        );
    }
    let mut reply = Reply::text(out).with_action("What should I write next?", "/insights");
    if let Some(top) = clusters.first() {
        reply = reply.with_action(
            &format!("Discuss {}", top.category),
            &format!("/cluster {}", top.category),
        );
    }
    reply
}

/// Category named in the input, matched case-insensitively.
fn find_category(metrics: &MetricsService, input: &Input) -> Option<String> {
    metrics
        .dataset()
        .pages
        .iter()
        .map(|p| p.category.as_str())
        .find(|c| input.lower.contains(&c.to_ascii_lowercase()))
        .map(str::to_string)
}

pub fn cluster_detail(metrics: &MetricsService, input: &Input, state: &mut SessionState) -> Reply {
    let Some(category) = find_category(metrics, input) else {
        let mut reply = cluster_overview(metrics, input, state);
        reply.content = format!(
            "I couldn't tell which cluster you meant.\n\n{}",
            reply.content
        );
        return reply;
    };
    let pages = metrics.get_cluster_pages(&category, DateRange::trailing());
    let mut out = format!("**{}** ({} pages):\n\n", category, pages.len());
    for p in &pages {
        let _ = writeln!(
            out,
            "- {} [{}]: {} clicks ({}), {:.2}% CTR. {}",
            p.page.title,
            p.status.label(),
            format_count(p.clicks),
            format_change(p.click_change),
            p.ctr,
            p.reason
        );
    }
    let attention = pages
        .iter()
        .filter(|p| p.status != PageStatus::Performing)
        .count();
    if attention > 0 {
        let _ = write!(out, "\n{} page(s) need work.", attention);
    }
    Reply::text(out)
        .with_action("Production priorities", "/insights")
        .with_action("Back to clusters", "/clusters")
}

pub fn production_insights(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let insights = metrics.get_content_production_insights(DateRange::trailing());
    if insights.is_empty() {
        return Reply::text("Not enough cluster data to prioritise yet.");
    }
    let mut out = String::from("**Content production priorities:**\n\n");
    for i in &insights {
        let _ = writeln!(out, "**{}: {}**\n{}", i.label, i.category, i.rationale);
        for action in &i.actions {
            let _ = writeln!(out, "  - {}", action);
        }
        out.push('\n');
    }
    let top = &insights[0];
    Reply::text(out.trim_end().to_string()).with_action(
        &format!("Discuss {}", top.category),
        &format!("/cluster {}", top.category),
    )
}

pub fn content_funnel(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let stages = metrics.get_content_funnel_data(DateRange::trailing());
    let mut out = String::from("**Content funnel, last 30 days:**\n\n");
    for s in &stages {
        let _ = write!(
            out,
            "- **{}**: {} ({:.1}%)",
            s.stage,
            format_count(s.count),
            s.percentage
        );
        if let Some(lead) = s.breakdown.first() {
            let _ = write!(out, ", led by {} at {:.1}%", lead.category, lead.share);
        }
        out.push('\n');
    }
    Reply::text(out).with_action("Lead details", "/leads")
}

pub fn top_movers(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let movers = metrics.get_top_movers(DateRange::trailing());
    let mut out = String::from("**Rising:**\n");
    if movers.rising.is_empty() {
        out.push_str("- nothing is growing this period\n");
    }
    for p in &movers.rising {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            p.page.title,
            p.page.category,
            format_change(p.click_change)
        );
    }
    out.push_str("\n**Falling:**\n");
    if movers.falling.is_empty() {
        out.push_str("- nothing is declining this period\n");
    }
    for p in &movers.falling {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            p.page.title,
            p.page.category,
            format_change(p.click_change)
        );
    }
    Reply::text(out).with_action("Find stale content", "/freshness")
}

pub fn content_freshness(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let buckets = metrics.get_content_freshness_data(DateRange::trailing());
    let mut out = String::from("**Content freshness:**\n\n");
    for b in &buckets {
        let _ = writeln!(
            out,
            "- {}: {} pages, {} clicks",
            b.bucket.label(),
            b.page_count,
            format_count(b.total_clicks)
        );
    }
    if let Some(stale) = buckets.last().filter(|b| b.page_count > 0) {
        let titles: Vec<&str> = stale.pages.iter().map(|p| p.title.as_str()).collect();
        let _ = write!(out, "\nRefresh candidates: {}.", titles.join(", "));
    }
    Reply::text(out).with_action("Show top movers", "/movers")
}

pub fn lead_summary(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let mut out = String::from("**Leads, last 30 days:**\n\n");
    out.push_str(&metric_line(metrics, MetricKey::Leads));
    out.push('\n');
    out.push_str(&metric_line(metrics, MetricKey::PipelineValue));
    out.push_str("\n\n**All leads by status:**\n");
    let leads = &metrics.dataset().leads;
    for status in [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ] {
        let matching: Vec<_> = leads.iter().filter(|l| l.status == status).collect();
        let value: f64 = matching.iter().map(|l| l.value).sum();
        let _ = writeln!(
            out,
            "- {}: {} ({})",
            status.as_str(),
            matching.len(),
            format_currency(value)
        );
    }
    Reply::text(out).with_action("Which industries convert?", "/gaps")
}

pub fn content_gaps(metrics: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    let intel = metrics.get_content_intelligence();
    let mut out = String::from("**Industry coverage vs pipeline:**\n\n");
    for i in &intel {
        let _ = writeln!(
            out,
            "- **{}**: {} leads, {:.1}% converted, {} pipeline, coverage {}",
            i.industry,
            i.leads,
            i.conversion_rate,
            format_currency(i.pipeline_value),
            i.coverage.as_str()
        );
        for topic in &i.suggested_topics {
            let _ = writeln!(out, "  - {}", topic);
        }
    }
    let mut reply = Reply::text(out);
    if let Some(gap) = intel.iter().find(|i| i.coverage == Coverage::Weak) {
        reply = reply.with_action(
            &format!("Create a {} cluster", gap.industry),
            &format!("I'm planning to create a {} topical cluster", gap.industry),
        );
    }
    reply
}

pub fn help(_: &MetricsService, _: &Input, _: &mut SessionState) -> Reply {
    Reply::text(
        "I can help with your content performance. Try:\n\n\
         - `/traffic overview`: organic clicks, impressions, CTR and position\n\
         - `/ai citations`: visibility in ChatGPT, Perplexity and other AI engines\n\
         - `/clusters` or `/cluster <name>`: topical cluster performance\n\
         - `/insights`: what to write next\n\
         - `/funnel`: impressions to captured leads\n\
         - `/movers`: rising and falling pages\n\
         - `/freshness`: content that needs a refresh\n\
         - `/leads` and `/gaps`: pipeline and industry coverage\n\
         - \"create a <industry> topical cluster\": propose a new cluster",
    )
    .with_action("Traffic overview", "/traffic overview")
}
