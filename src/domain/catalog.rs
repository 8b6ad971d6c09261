//! Static catalogs: articles, leads, CTA landing pages and the industry coverage table.
//!
//! Dates are stored as offsets from the anchor day so the catalog moves with the
//! generated series.

use super::analytics::Coverage;
use super::entities::LeadStatus;

pub const BLOG_BASE_URL: &str = "https://example.com/blog/";
pub const PRICING_URL: &str = "https://example.com/pricing";

pub struct PageSeed {
    pub id: u32,
    pub slug: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub published_days_ago: i64,
    pub share: f64,
    pub impression_factor: f64,
    pub trend: f64,
}

pub struct LeadSeed {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub company: &'static str,
    pub job_title: &'static str,
    pub industry: &'static str,
    /// Blog slug, or a full URL for non-blog sources.
    pub source: &'static str,
    pub status: LeadStatus,
    pub value: f64,
    pub created_days_ago: i64,
}

pub fn page_url(slug: &str) -> String {
    if slug.starts_with("https://") {
        slug.to_string()
    } else {
        format!("{}{}", BLOG_BASE_URL, slug)
    }
}

const fn page(
    id: u32,
    slug: &'static str,
    title: &'static str,
    category: &'static str,
    author: &'static str,
    published_days_ago: i64,
    share: f64,
    impression_factor: f64,
    trend: f64,
) -> PageSeed {
    PageSeed {
        id,
        slug,
        title,
        category,
        author,
        published_days_ago,
        share,
        impression_factor,
        trend,
    }
}

pub const PAGES: &[PageSeed] = &[
    page(1, "technical-seo-audit-checklist", "The Technical SEO Audit Checklist", "SEO Strategy", "Maya Chen", 420, 0.075, 1.0, 0.3),
    page(2, "keyword-clustering-guide", "Keyword Clustering: A Practical Guide", "SEO Strategy", "Daniel Ortiz", 200, 0.06, 0.9, 0.5),
    page(3, "internal-linking-strategy", "Internal Linking Strategy That Scales", "SEO Strategy", "Maya Chen", 500, 0.045, 1.1, -0.4),
    page(4, "core-web-vitals-explained", "Core Web Vitals Explained", "SEO Strategy", "Jonas Weber", 700, 0.035, 1.8, -0.1),
    page(5, "seo-for-saas", "SEO for SaaS Companies", "SEO Strategy", "Priya Raman", 300, 0.015, 1.6, 0.0),
    page(6, "content-calendar-template", "The Content Calendar Template We Actually Use", "Content Marketing", "Priya Raman", 150, 0.06, 0.8, 0.2),
    page(7, "pillar-page-examples", "12 Pillar Page Examples That Rank", "Content Marketing", "Daniel Ortiz", 60, 0.05, 1.0, 0.6),
    page(8, "content-repurposing-playbook", "The Content Repurposing Playbook", "Content Marketing", "Maya Chen", 380, 0.025, 1.2, -0.6),
    page(9, "b2b-storytelling", "B2B Storytelling Frameworks", "Content Marketing", "Jonas Weber", 800, 0.01, 2.0, -0.2),
    page(10, "generative-engine-optimization", "Generative Engine Optimization: The Complete Guide", "AI Search", "Priya Raman", 45, 0.07, 0.7, 0.8),
    page(11, "llm-citation-tracking", "How to Track LLM Citations of Your Content", "AI Search", "Daniel Ortiz", 20, 0.05, 0.8, 0.7),
    page(12, "ai-overviews-impact", "What AI Overviews Mean for Organic Traffic", "AI Search", "Maya Chen", 100, 0.04, 1.3, 0.4),
    page(13, "structured-data-for-ai", "Structured Data for AI Answer Engines", "AI Search", "Jonas Weber", 250, 0.02, 1.0, 0.1),
    page(14, "gated-content-conversion", "Does Gated Content Still Convert?", "Lead Generation", "Priya Raman", 210, 0.04, 1.0, 0.1),
    page(15, "landing-page-copy", "Landing Page Copy That Converts", "Lead Generation", "Daniel Ortiz", 330, 0.03, 1.1, -0.3),
    page(16, "lead-magnet-ideas", "27 Lead Magnet Ideas for B2B", "Lead Generation", "Jonas Weber", 450, 0.02, 1.4, 0.0),
    page(17, "content-attribution-models", "Content Attribution Models Compared", "Analytics", "Maya Chen", 120, 0.035, 0.9, 0.4),
    page(18, "ga4-content-reports", "GA4 Reports Every Content Team Needs", "Analytics", "Jonas Weber", 260, 0.02, 1.1, -0.2),
    page(19, "newsletter-growth-tactics", "Newsletter Growth Tactics", "Email Marketing", "Priya Raman", 90, 0.02, 1.0, 0.3),
    page(20, "email-nurture-sequences", "Email Nurture Sequences That Close", "Email Marketing", "Daniel Ortiz", 600, 0.012, 1.2, -0.5),
];

/// CTA landing pages (blog slugs) and their fixed share of daily CTA clicks.
/// The first entry absorbs rounding remainders.
pub const LANDING_PAGES: &[(&str, f64)] = &[
    ("gated-content-conversion", 0.22),
    ("generative-engine-optimization", 0.16),
    ("landing-page-copy", 0.14),
    ("technical-seo-audit-checklist", 0.12),
    ("content-calendar-template", 0.10),
    ("content-attribution-models", 0.10),
    ("lead-magnet-ideas", 0.08),
    ("pillar-page-examples", 0.08),
];

const fn lead(
    id: u32,
    name: &'static str,
    email: &'static str,
    company: &'static str,
    job_title: &'static str,
    industry: &'static str,
    source: &'static str,
    status: LeadStatus,
    value: f64,
    created_days_ago: i64,
) -> LeadSeed {
    LeadSeed {
        id,
        name,
        email,
        company,
        job_title,
        industry,
        source,
        status,
        value,
        created_days_ago,
    }
}

use LeadStatus::{Contacted, Converted, Lost, New, Qualified};

pub const LEADS: &[LeadSeed] = &[
    lead(1, "Sarah Mitchell", "sarah.mitchell@northwind.io", "Northwind Labs", "Head of Growth", "Technology", "gated-content-conversion", Converted, 24000.0, 3),
    lead(2, "Tom Becker", "tom.becker@ledgerly.com", "Ledgerly", "Marketing Director", "Finance", "generative-engine-optimization", Qualified, 18000.0, 5),
    lead(3, "Aisha Khan", "aisha.khan@medicore.health", "MediCore Health", "Content Lead", "Healthcare", "technical-seo-audit-checklist", New, 9000.0, 6),
    lead(4, "Lucas Moreau", "lucas@shopwave.co", "Shopwave", "Ecommerce Manager", "Retail", "landing-page-copy", Contacted, 7500.0, 8),
    lead(5, "Emily Zhang", "emily.zhang@cloudfort.dev", "Cloudfort", "VP Marketing", "Technology", "generative-engine-optimization", Converted, 32000.0, 10),
    lead(6, "Rafael Souza", "rafael@steelpoint.com", "Steelpoint Industries", "Demand Gen Manager", "Manufacturing", "content-attribution-models", Qualified, 15000.0, 12),
    lead(7, "Hannah Oyelaran", "hannah@brightpath.edu", "BrightPath Academy", "Admissions Marketing", "Education", "content-calendar-template", New, 5000.0, 14),
    lead(8, "Marcus Reid", "marcus.reid@capitalcrest.com", "CapitalCrest", "CMO", "Finance", "gated-content-conversion", Converted, 28000.0, 16),
    lead(9, "Julia Novak", "julia.novak@datastream.ai", "Datastream AI", "SEO Manager", "Technology", "llm-citation-tracking", Qualified, 21000.0, 18),
    lead(10, "Omar Haddad", "omar@carelink.org", "CareLink", "Digital Director", "Healthcare", "ai-overviews-impact", Lost, 11000.0, 20),
    lead(11, "Grace Lee", "grace.lee@urbanthreads.com", "Urban Threads", "Brand Manager", "Retail", "pillar-page-examples", New, 6000.0, 22),
    lead(12, "Peter Lindqvist", "peter@forgeworks.se", "Forgeworks", "Marketing Lead", "Manufacturing", "lead-magnet-ideas", Contacted, 12000.0, 25),
    lead(13, "Nina Petrova", "nina@paygrid.io", "PayGrid", "Growth Marketer", "Finance", PRICING_URL, Qualified, 19000.0, 27),
    lead(14, "David Kim", "david.kim@stackhaus.com", "Stackhaus", "Founder", "Technology", "technical-seo-audit-checklist", Converted, 26000.0, 30),
    lead(15, "Laura Fischer", "laura@lexcounsel.com", "LexCounsel", "Marketing Partner", "Legal", "content-repurposing-playbook", New, 8000.0, 34),
    lead(16, "Carlos Mendes", "carlos@vitalabs.health", "Vita Labs", "Head of Content", "Healthcare", "generative-engine-optimization", Qualified, 14000.0, 38),
    lead(17, "Sophie Martin", "sophie@learnly.edu", "Learnly", "Growth Lead", "Education", "newsletter-growth-tactics", Lost, 4000.0, 42),
    lead(18, "Ben Carter", "ben.carter@quantive.io", "Quantive", "Marketing Ops", "Technology", "content-attribution-models", Contacted, 17000.0, 46),
    lead(19, "Mei Tanaka", "mei@freshcart.jp", "FreshCart", "Digital Marketing Lead", "Retail", "gated-content-conversion", Converted, 9500.0, 50),
    lead(20, "Jonah Weiss", "jonah@ironclad-mfg.com", "Ironclad Manufacturing", "VP Sales", "Manufacturing", "landing-page-copy", Lost, 13000.0, 55),
    lead(21, "Fatima Noor", "fatima@trustbank.com", "TrustBank", "Content Strategist", "Finance", "keyword-clustering-guide", Contacted, 16000.0, 61),
    lead(22, "Alex Rivera", "alex@devpilot.io", "DevPilot", "Product Marketing", "Technology", "keyword-clustering-guide", Qualified, 20000.0, 67),
    lead(23, "Ingrid Berg", "ingrid@nordhealth.no", "Nord Health", "Marketing Manager", "Healthcare", "email-nurture-sequences", Contacted, 10000.0, 74),
    lead(24, "Victor Alvarez", "victor@counselhub.com", "CounselHub", "Operations Director", "Legal", PRICING_URL, Qualified, 9000.0, 82),
];

/// How well the content library covers each industry. Not derived from data.
pub const INDUSTRY_COVERAGE: &[(&str, Coverage)] = &[
    ("Technology", Coverage::Strong),
    ("Finance", Coverage::Moderate),
    ("Healthcare", Coverage::Weak),
    ("Retail", Coverage::Weak),
    ("Manufacturing", Coverage::Moderate),
    ("Education", Coverage::Weak),
];

pub const SUGGESTED_TOPICS: &[(&str, &[&str])] = &[
    (
        "Finance",
        &[
            "Content compliance checklist for financial services",
            "Measuring content ROI for fintech buyers",
            "Explaining AI search to finance marketing teams",
        ],
    ),
    (
        "Healthcare",
        &[
            "HIPAA-safe content workflows",
            "Patient education content that ranks",
            "Medical review processes for YMYL content",
        ],
    ),
    (
        "Retail",
        &[
            "Product-led content for ecommerce",
            "Seasonal content calendars for retail",
            "Shoppable guides and AI shopping assistants",
        ],
    ),
    (
        "Manufacturing",
        &[
            "Technical buyer guides for industrial products",
            "Turning spec sheets into search content",
        ],
    ),
    (
        "Education",
        &[
            "Enrollment funnel content",
            "Program comparison pages for prospective students",
        ],
    ),
];

/// Coverage for an industry; unknown industries count as weak.
pub fn coverage_for(industry: &str) -> Coverage {
    INDUSTRY_COVERAGE
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, c)| *c)
        .unwrap_or(Coverage::Weak)
}

/// Suggested topics for weak and moderate industries. Empty for strong or unknown ones.
pub fn suggested_topics_for(industry: &str) -> Vec<String> {
    if coverage_for(industry) == Coverage::Strong {
        return Vec::new();
    }
    SUGGESTED_TOPICS
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, topics)| topics.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_and_urls_are_unique() {
        assert_eq!(PAGES.len(), 20);
        let ids: HashSet<u32> = PAGES.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PAGES.len());
        let slugs: HashSet<&str> = PAGES.iter().map(|p| p.slug).collect();
        assert_eq!(slugs.len(), PAGES.len());
    }

    #[test]
    fn landing_pages_exist_and_weights_sum_to_one() {
        let total: f64 = LANDING_PAGES.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
        for (slug, _) in LANDING_PAGES {
            assert!(PAGES.iter().any(|p| p.slug == *slug), "{slug}");
        }
    }

    #[test]
    fn coverage_lookup_defaults_to_weak() {
        assert_eq!(coverage_for("Technology"), Coverage::Strong);
        assert_eq!(coverage_for("Legal"), Coverage::Weak);
        assert!(suggested_topics_for("Legal").is_empty());
        assert!(suggested_topics_for("Technology").is_empty());
        assert_eq!(suggested_topics_for("Healthcare").len(), 3);
    }

    #[test]
    fn page_url_keeps_absolute_sources() {
        assert_eq!(page_url(PRICING_URL), PRICING_URL);
        assert_eq!(page_url("seo-for-saas"), "https://example.com/blog/seo-for-saas");
    }
}
