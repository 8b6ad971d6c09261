//! Implements InputPort. Inquire-based interactive menu and chat loop.

use super::banner::{CHART_TEAL, PULSE_ORANGE, Rgb};
use super::progress::typing_spinner;
use crate::domain::{
    AppEvent, ChatMessage, DateRange, DiscussCluster, DomainError, MetricKey,
};
use crate::ports::InputPort;
use crate::usecases::cluster_registry::ClusterList;
use crate::usecases::metrics::format::format_change;
use crate::usecases::{ChatService, ChatSession, ExportService, MetricsService};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;

const OWN_MESSAGE: &str = "Type my own message";

fn prompt_color((r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Applies the banner palette to every inquire prompt. Called once from `init_ui`.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(prompt_color(CHART_TEAL)))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(prompt_color(PULSE_ORANGE)));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Chat,
    Dashboard,
    DiscussCluster,
    ArticleLookup,
    ExportLeads,
    CreatedClusters,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        MenuItem::Chat,
        MenuItem::Dashboard,
        MenuItem::DiscussCluster,
        MenuItem::ArticleLookup,
        MenuItem::ExportLeads,
        MenuItem::CreatedClusters,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Chat => "Chat with the assistant",
            MenuItem::Dashboard => "Dashboard summary",
            MenuItem::DiscussCluster => "Discuss a cluster",
            MenuItem::ArticleLookup => "Article lookup",
            MenuItem::ExportLeads => "Export leads (CSV)",
            MenuItem::CreatedClusters => "Clusters created this session",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Esc and Ctrl-C end the current prompt instead of failing the app.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn print_message(message: &ChatMessage) {
    println!("\n{}\n", message.content.replace("**", ""));
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    metrics: MetricsService,
    chat: Arc<ChatService>,
    export: Arc<ExportService>,
    clusters: ClusterList,
}

impl TuiInputPort {
    pub fn new(
        metrics: MetricsService,
        chat: Arc<ChatService>,
        export: Arc<ExportService>,
        clusters: ClusterList,
    ) -> Self {
        Self {
            metrics,
            chat,
            export,
            clusters,
        }
    }

    /// Chat until the user submits an empty line or cancels. An optional UI event opens the conversation.
    async fn chat_loop(&self, opening: Option<AppEvent>) -> Result<(), DomainError> {
        println!("Ask a question or use a slash command (/help). Empty line returns to the menu.");
        let mut session = ChatSession::new();

        let mut next = match opening {
            Some(event) => {
                let reply = self.with_spinner(self.chat.handle_event(&mut session, &event)).await;
                self.show_and_pick(reply.as_ref())?
            }
            None => None,
        };

        loop {
            let text = match next.take() {
                Some(text) => {
                    println!("You: {}", text);
                    text
                }
                None => match answered(Text::new("You:").prompt())? {
                    Some(text) if !text.trim().is_empty() => text,
                    _ => return Ok(()),
                },
            };
            let reply = self.with_spinner(self.chat.send_message(&mut session, &text)).await;
            next = self.show_and_pick(reply.as_ref())?;
        }
    }

    async fn with_spinner<F>(&self, turn: F) -> Option<ChatMessage>
    where
        F: std::future::Future<Output = Option<ChatMessage>>,
    {
        let spinner = typing_spinner("Assistant is typing...");
        let reply = turn.await;
        spinner.finish_and_clear();
        reply
    }

    /// Print the reply; if it offers actions, let the user pick one as the next message.
    fn show_and_pick(&self, reply: Option<&ChatMessage>) -> Result<Option<String>, DomainError> {
        let Some(reply) = reply else {
            return Ok(None);
        };
        print_message(reply);
        if reply.actions.is_empty() {
            return Ok(None);
        }
        let mut options: Vec<String> = reply.actions.iter().map(|a| a.label.clone()).collect();
        options.push(OWN_MESSAGE.to_string());
        let Some(choice) = answered(Select::new("Next:", options).prompt())? else {
            return Ok(None);
        };
        Ok(reply
            .actions
            .iter()
            .find(|a| a.label == choice)
            .map(|a| a.message.clone()))
    }

    fn show_dashboard(&self) {
        let range = DateRange::trailing();
        println!("\nLast 30 days vs previous 30:");
        for key in MetricKey::ALL {
            if let Some(mv) = self.metrics.get_metric_value(key.as_str(), range, range) {
                let change = format_change(mv.change.map(|c| c as f64));
                println!("  {:<18} {:>12}  {}", key.label(), mv.value, change);
            }
        }
        println!("\nClusters:");
        for c in self.metrics.get_cluster_data(range) {
            println!(
                "  {:<18} {:>3} pages  {:>7} clicks  {:>5.2}% CTR",
                c.category, c.page_count, c.total_clicks, c.ctr
            );
        }
        println!();
    }

    async fn discuss_cluster(&self) -> Result<(), DomainError> {
        let categories: Vec<String> = self
            .metrics
            .get_cluster_data(DateRange::trailing())
            .into_iter()
            .map(|c| c.category)
            .collect();
        let Some(category) = answered(Select::new("Cluster:", categories).prompt())? else {
            return Ok(());
        };
        self.chat_loop(Some(AppEvent::DiscussCluster(DiscussCluster { category })))
            .await
    }

    fn article_lookup(&self) -> Result<(), DomainError> {
        let Some(raw) = answered(Text::new("Article id:").prompt())? else {
            return Ok(());
        };
        let page = raw
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|id| self.metrics.find_page(id));
        match page {
            Some(p) => println!(
                "\n{}\n  {}\n  {} · {} · published {}\n",
                p.title, p.url, p.category, p.author, p.publish_date
            ),
            None => println!("\nArticle not found\n"),
        }
        Ok(())
    }

    async fn show_created_clusters(&self) {
        let clusters = self.clusters.read().await;
        if clusters.is_empty() {
            println!("\nNo clusters created yet. Ask the assistant to create one.\n");
            return;
        }
        println!();
        for c in clusters.iter() {
            println!("  {} ({}), created {}", c.name, c.industry, c.created_on);
        }
        println!();
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(item) = answered(Select::new("Main menu", MenuItem::ALL.to_vec()).prompt())?
            else {
                return Ok(());
            };
            match item {
                MenuItem::Chat => self.chat_loop(None).await?,
                MenuItem::Dashboard => self.show_dashboard(),
                MenuItem::DiscussCluster => self.discuss_cluster().await?,
                MenuItem::ArticleLookup => self.article_lookup()?,
                MenuItem::ExportLeads => {
                    let path = self.export.export_leads().await?;
                    println!("\nLeads written to {}\n", path.display());
                }
                MenuItem::CreatedClusters => self.show_created_clusters().await,
                MenuItem::Quit => return Ok(()),
            }
        }
    }
}
