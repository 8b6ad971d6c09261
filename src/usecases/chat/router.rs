//! Command router: an ordered table of subagents, first match wins.
//!
//! Matching is done on ASCII-lowercased input so byte offsets line up with the
//! original text when a handler extracts a phrase from it.

use super::handlers::{self, Handler};
use crate::domain::{Reply, SessionState};
use crate::usecases::metrics::MetricsService;
use tracing::debug;

/// One user turn, normalised for matching.
#[derive(Debug, Clone)]
pub struct Input {
    pub raw: String,
    pub lower: String,
}

impl Input {
    pub fn new(text: &str) -> Self {
        let raw = text.trim().to_string();
        let lower = raw.to_ascii_lowercase();
        Self { raw, lower }
    }

    /// Whole-word match for single words, substring match for phrases.
    /// A trailing `*` matches any word starting with the stem.
    pub fn has_term(&self, term: &str) -> bool {
        if term.contains(' ') {
            return self.lower.contains(term);
        }
        let words = self
            .lower
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '/' || c == '-'))
            .filter(|w| !w.is_empty());
        match term.strip_suffix('*') {
            Some(stem) => words.into_iter().any(|w| w.starts_with(stem)),
            None => words.into_iter().any(|w| w == term),
        }
    }

    /// Text after a slash command, if the input starts with it.
    pub fn command_arg(&self, command: &str) -> Option<&str> {
        if self.lower == command {
            return Some("");
        }
        self.lower
            .strip_prefix(command)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(|_| self.raw[command.len()..].trim())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Slash command, alone or followed by an argument.
    Command(&'static str),
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
    /// At least one term from each list.
    Both(&'static [&'static str], &'static [&'static str]),
    /// "create a|an <industry> [topical] cluster" or "/create-cluster <industry>".
    CreateCluster,
}

impl Matcher {
    pub fn matches(&self, input: &Input) -> bool {
        match self {
            Matcher::Command(cmd) => input.command_arg(cmd).is_some(),
            Matcher::AnyOf(terms) => terms.iter().any(|t| input.has_term(t)),
            Matcher::AllOf(terms) => terms.iter().all(|t| input.has_term(t)),
            Matcher::Both(a, b) => {
                a.iter().any(|t| input.has_term(t)) && b.iter().any(|t| input.has_term(t))
            }
            Matcher::CreateCluster => extract_cluster_industry(input).is_some(),
        }
    }
}

/// Industry named in a cluster-creation request.
pub fn extract_cluster_industry(input: &Input) -> Option<String> {
    if let Some(arg) = input.command_arg("/create-cluster") {
        return (!arg.is_empty()).then(|| arg.to_string());
    }
    let lower = input.lower.as_str();
    let start = ["create a ", "create an ", "build a ", "build an "]
        .iter()
        .filter_map(|p| lower.find(p).map(|i| i + p.len()))
        .min()?;
    let end = start + lower[start..].find(" cluster")?;
    let mut phrase = &input.raw[start..end];
    for suffix in [" topical", " topic", " content"] {
        if phrase.to_ascii_lowercase().ends_with(suffix) {
            phrase = &phrase[..phrase.len() - suffix.len()];
        }
    }
    let phrase = phrase.trim();
    let words = phrase.split_whitespace().count();
    (words > 0 && words <= 4).then(|| phrase.to_string())
}

pub struct Subagent {
    pub name: &'static str,
    pub matcher: Matcher,
    pub handler: Handler,
}

const fn agent(name: &'static str, matcher: Matcher, handler: Handler) -> Subagent {
    Subagent {
        name,
        matcher,
        handler,
    }
}

/// Consulted before the table, and only while a proposal is pending.
const CONFIRM: Subagent = agent(
    "confirm-cluster",
    Matcher::AnyOf(&["confirm topic", "looks good"]),
    handlers::confirm_cluster,
);

const HELP: Subagent = agent("help", Matcher::Command("/help"), handlers::help);

/// Priority order: cluster creation, slash commands, natural language, keyword catch-alls.
fn default_table() -> Vec<Subagent> {
    use Matcher::{AllOf, AnyOf, Both, Command};
    vec![
        agent("create-cluster", Matcher::CreateCluster, handlers::create_cluster),
        agent("traffic-overview", Command("/traffic overview"), handlers::traffic_overview),
        agent("traffic-overview", Command("/traffic"), handlers::traffic_overview),
        agent("ai-citations", Command("/ai citations"), handlers::ai_citations),
        agent("ai-citations", Command("/ai"), handlers::ai_citations),
        agent("cluster-overview", Command("/clusters"), handlers::cluster_overview),
        agent("cluster-detail", Command("/cluster"), handlers::cluster_detail),
        agent("production-insights", Command("/insights"), handlers::production_insights),
        agent("content-funnel", Command("/funnel"), handlers::content_funnel),
        agent("top-movers", Command("/movers"), handlers::top_movers),
        agent("content-freshness", Command("/freshness"), handlers::content_freshness),
        agent("lead-summary", Command("/leads"), handlers::lead_summary),
        agent("content-gaps", Command("/gaps"), handlers::content_gaps),
        HELP,
        agent(
            "cluster-detail",
            Both(&["tell me about", "discuss", "dig into", "drill into"], &["cluster*"]),
            handlers::cluster_detail,
        ),
        agent(
            "traffic-overview",
            Both(
                &["traffic", "clicks", "visits", "impressions"],
                &["how", "overview", "doing", "trend*", "summary", "performing"],
            ),
            handlers::traffic_overview,
        ),
        agent(
            "ai-citations",
            AnyOf(&["chatgpt", "perplexity", "gemini", "citation*", "llm*", "ai search", "ai engines"]),
            handlers::ai_citations,
        ),
        agent(
            "production-insights",
            AnyOf(&["priorit*", "double down", "next content", "insights"]),
            handlers::production_insights,
        ),
        agent("production-insights", AllOf(&["what", "write*"]), handlers::production_insights),
        agent(
            "top-movers",
            AnyOf(&["declin*", "dropping", "falling", "rising", "movers", "winners", "losers"]),
            handlers::top_movers,
        ),
        agent(
            "content-freshness",
            AnyOf(&["stale", "outdated", "refresh*", "freshness", "old content"]),
            handlers::content_freshness,
        ),
        agent(
            "content-gaps",
            AnyOf(&["content gap", "gaps", "industry", "industries", "coverage"]),
            handlers::content_gaps,
        ),
        agent("content-funnel", AnyOf(&["funnel", "conversion*"]), handlers::content_funnel),
        agent("lead-summary", AnyOf(&["lead*", "pipeline", "prospects"]), handlers::lead_summary),
        agent("traffic-overview", AnyOf(&["traffic", "report", "dashboard"]), handlers::traffic_overview),
        agent("cluster-overview", AnyOf(&["cluster*", "topics", "categories"]), handlers::cluster_overview),
        agent("help", AnyOf(&["help", "commands", "hi", "hello"]), handlers::help),
    ]
}

/// Result of routing one turn.
#[derive(Debug, Clone)]
pub struct Routed {
    /// Name of the subagent that handled the input; `fallback` when none matched.
    pub subagent: &'static str,
    pub reply: Reply,
}

pub struct CommandRouter {
    metrics: MetricsService,
    table: Vec<Subagent>,
}

impl CommandRouter {
    pub fn new(metrics: MetricsService) -> Self {
        Self {
            metrics,
            table: default_table(),
        }
    }

    /// Select exactly one handler for `text`. Never fails: unmatched input gets the help reply.
    pub fn route(&self, text: &str, state: &mut SessionState) -> Routed {
        let input = Input::new(text);

        if state.is_awaiting_confirmation() && CONFIRM.matcher.matches(&input) {
            return self.run(&CONFIRM, &input, state);
        }
        if let Some(agent) = self.table.iter().find(|a| a.matcher.matches(&input)) {
            return self.run(agent, &input, state);
        }

        debug!(input = %input.raw, "no subagent matched");
        Routed {
            subagent: "fallback",
            reply: handlers::help(&self.metrics, &input, state),
        }
    }

    fn run(&self, agent: &Subagent, input: &Input, state: &mut SessionState) -> Routed {
        debug!(subagent = agent.name, input = %input.raw, "routing");
        Routed {
            subagent: agent.name,
            reply: (agent.handler)(&self.metrics, input, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Effect;
    use crate::usecases::metrics::test_support::service;

    fn router() -> CommandRouter {
        CommandRouter::new(service())
    }

    fn route(text: &str) -> &'static str {
        router().route(text, &mut SessionState::default()).subagent
    }

    #[test]
    fn slash_commands_beat_catch_alls() {
        assert_eq!(route("/traffic overview"), "traffic-overview");
        assert_eq!(route("/ai citations"), "ai-citations");
        assert_eq!(route("/clusters"), "cluster-overview");
        assert_eq!(route("/cluster AI Search"), "cluster-detail");
        assert_eq!(route("/insights"), "production-insights");
        assert_eq!(route("/funnel"), "content-funnel");
        assert_eq!(route("/movers"), "top-movers");
        assert_eq!(route("/freshness"), "content-freshness");
        assert_eq!(route("/leads"), "lead-summary");
        assert_eq!(route("/gaps"), "content-gaps");
        assert_eq!(route("/help"), "help");
    }

    #[test]
    fn command_prefix_needs_word_boundary() {
        // "/clusters" must not be read as "/cluster s".
        assert_eq!(route("/clusters"), "cluster-overview");
        assert_eq!(route("/leadsx"), "fallback");
    }

    #[test]
    fn natural_language_routes() {
        assert_eq!(route("How is traffic doing this month?"), "traffic-overview");
        assert_eq!(route("Are we getting cited by ChatGPT?"), "ai-citations");
        assert_eq!(route("Which pages are declining?"), "top-movers");
        assert_eq!(route("What content is outdated?"), "content-freshness");
        assert_eq!(route("Where are our content gaps?"), "content-gaps");
        assert_eq!(route("Show me the funnel"), "content-funnel");
        assert_eq!(route("How many leads came in?"), "lead-summary");
        assert_eq!(route("Tell me about the SEO Strategy cluster"), "cluster-detail");
        assert_eq!(route("What should I write next?"), "production-insights");
    }

    #[test]
    fn keyword_terms_match_whole_words() {
        let input = Input::new("maintain the pipeline");
        assert!(!input.has_term("ai"));
        assert!(input.has_term("pipeline"));
        assert!(Input::new("declining pages").has_term("declin*"));
    }

    #[test]
    fn unmatched_input_falls_back_to_help() {
        let routed = router().route("asdf qwerty", &mut SessionState::default());
        assert_eq!(routed.subagent, "fallback");
        assert!(routed.reply.content.contains("/traffic overview"));
        assert_eq!(route(""), "fallback");
    }

    #[test]
    fn extracts_industry_from_creation_phrases() {
        let get = |s: &str| extract_cluster_industry(&Input::new(s));
        assert_eq!(
            get("I'm planning to create a Healthcare topical cluster").as_deref(),
            Some("Healthcare")
        );
        assert_eq!(get("Let's build an Insurance cluster").as_deref(), Some("Insurance"));
        assert_eq!(
            get("/create-cluster Legal Services").as_deref(),
            Some("Legal Services")
        );
        assert_eq!(get("create this cluster"), None);
        assert_eq!(get("/create-cluster"), None);
    }

    #[test]
    fn confirmation_only_applies_while_pending() {
        let r = router();
        let mut state = SessionState::default();
        let idle = r.route("Confirm topic — let's create this cluster.", &mut state);
        assert_ne!(idle.subagent, "confirm-cluster");
        assert!(idle.reply.effects.is_empty());

        let proposed = r.route("I'm planning to create a Healthcare topical cluster", &mut state);
        assert_eq!(proposed.subagent, "create-cluster");
        assert!(proposed.reply.actions.iter().any(|a| a.label == "Confirm topic"));
        assert!(state.is_awaiting_confirmation());

        let confirmed = r.route("Confirm topic — let's create this cluster.", &mut state);
        assert_eq!(confirmed.subagent, "confirm-cluster");
        assert!(!state.is_awaiting_confirmation());
        let [Effect::ClusterCreated(created)] = confirmed.reply.effects.as_slice() else {
            panic!("expected one effect");
        };
        assert_eq!(created.industry, "Healthcare");
    }

    #[test]
    fn questions_mentioning_confirm_do_not_create_clusters() {
        let r = router();
        let mut state = SessionState::default();
        r.route("create a Retail cluster", &mut state);

        let routed = r.route("Can you confirm how traffic is doing?", &mut state);
        assert_eq!(routed.subagent, "traffic-overview");
        assert!(routed.reply.effects.is_empty());
        assert_eq!(state.pending.as_ref().unwrap().industry, "Retail");
    }

    #[test]
    fn pending_proposal_does_not_block_other_questions() {
        let r = router();
        let mut state = SessionState::default();
        r.route("create a Retail cluster", &mut state);
        assert_eq!(r.route("/funnel", &mut state).subagent, "content-funnel");
        assert!(state.is_awaiting_confirmation());
    }
}
