//! Lead performance by industry against content coverage.

use super::MetricsService;
use super::format::{ratio, round_to};
use crate::domain::catalog::{coverage_for, suggested_topics_for};
use crate::domain::{IndustryIntelligence, LeadStatus};
use std::collections::BTreeMap;

impl MetricsService {
    /// One entry per industry with leads, sorted by pipeline value descending.
    /// Pipeline value excludes lost leads.
    pub fn get_content_intelligence(&self) -> Vec<IndustryIntelligence> {
        let mut groups: BTreeMap<&str, (usize, usize, f64)> = BTreeMap::new();
        for lead in &self.dataset().leads {
            let entry = groups.entry(lead.industry.as_str()).or_insert((0, 0, 0.0));
            entry.0 += 1;
            if lead.status == LeadStatus::Converted {
                entry.1 += 1;
            }
            if lead.status != LeadStatus::Lost {
                entry.2 += lead.value;
            }
        }

        let mut out: Vec<IndustryIntelligence> = groups
            .into_iter()
            .map(|(industry, (leads, converted, pipeline))| IndustryIntelligence {
                industry: industry.to_string(),
                leads,
                converted,
                conversion_rate: round_to(ratio(converted as f64, leads as f64) * 100.0, 1),
                pipeline_value: pipeline,
                coverage: coverage_for(industry),
                suggested_topics: suggested_topics_for(industry),
            })
            .collect();
        out.sort_by(|a, b| b.pipeline_value.total_cmp(&a.pipeline_value));
        out
    }
}
