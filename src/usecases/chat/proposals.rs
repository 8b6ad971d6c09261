//! Cluster proposals offered when the user wants to start a new topical cluster.

use crate::domain::ClusterProposal;

const PROPOSALS: &[(&str, &str, &str)] = &[
    (
        "Healthcare",
        "Healthcare Content Marketing Playbook",
        "Compliance-aware guides for healthcare marketers: HIPAA-safe workflows, patient education content and medical review processes for YMYL topics.",
    ),
    (
        "Finance",
        "Financial Services Content Strategy",
        "Trust-building content for fintech and banking teams: regulatory review, ROI measurement and explaining AI search to finance stakeholders.",
    ),
    (
        "Technology",
        "SaaS Growth Content Engine",
        "Product-led content for software companies: comparison pages, integration guides and technical SEO for documentation.",
    ),
    (
        "Retail",
        "Retail & Ecommerce Content Hub",
        "Shoppable guides, seasonal calendars and product-led articles built for ecommerce search and AI shopping assistants.",
    ),
    (
        "Manufacturing",
        "Industrial Buyer's Content Library",
        "Technical buyer guides and spec-sheet-to-article workflows for long B2B manufacturing sales cycles.",
    ),
    (
        "Education",
        "Enrollment Marketing Content Series",
        "Program comparison pages and enrollment-funnel content for schools and online learning providers.",
    ),
];

/// Canonical spelling of a known industry, matched case-insensitively.
pub fn known_industry(name: &str) -> Option<&'static str> {
    PROPOSALS
        .iter()
        .map(|(industry, _, _)| *industry)
        .find(|industry| industry.eq_ignore_ascii_case(name.trim()))
}

/// Proposal for `industry`; unknown industries get a templated one.
pub fn proposal_for(industry: &str) -> ClusterProposal {
    let industry = industry.trim();
    match PROPOSALS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(industry))
    {
        Some((name, title, description)) => ClusterProposal {
            industry: name.to_string(),
            name: title.to_string(),
            description: description.to_string(),
        },
        None => {
            let industry = title_case(industry);
            ClusterProposal {
                name: format!("{} Content Hub", industry),
                description: format!(
                    "Foundational guides, benchmarks and case studies for {} marketing teams, \
                     built around the questions buyers ask search and AI engines.",
                    industry
                ),
                industry,
            }
        }
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_industries_use_the_table() {
        let p = proposal_for("healthcare");
        assert_eq!(p.industry, "Healthcare");
        assert_eq!(p.name, "Healthcare Content Marketing Playbook");
        assert_eq!(known_industry("FINANCE"), Some("Finance"));
    }

    #[test]
    fn unknown_industries_get_generic_proposal() {
        let p = proposal_for("legal services");
        assert_eq!(p.industry, "Legal Services");
        assert_eq!(p.name, "Legal Services Content Hub");
        assert!(p.description.contains("Legal Services"));
        assert_eq!(known_industry("legal services"), None);
    }
}
