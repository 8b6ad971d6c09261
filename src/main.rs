//! Wiring & DI. Entry point: generate the dataset, build services, run UI.
//! No business logic here.

use content_pulse::adapters::events::{ChannelEventBus, DEFAULT_EVENT_QUEUE_SIZE};
use content_pulse::adapters::export::FsExporter;
use content_pulse::adapters::synthetic::SyntheticGenerator;
use content_pulse::adapters::ui::tui::TuiInputPort;
use content_pulse::ports::{EventPort, ExportPort, InputPort};
use content_pulse::shared::config::AppConfig;
use content_pulse::usecases::{
    ChatService, ClusterRegistry, CommandRouter, ExportService, MetricsService,
};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    content_pulse::adapters::ui::init_ui();

    let cfg = AppConfig::load()?;
    let today = chrono::Local::now().date_naive();
    let anchor = cfg.anchor_date_or(today)?;

    // --- Dataset: generated once, shared read-only ---
    let generator = SyntheticGenerator::new(
        cfg.seed_or_default(),
        anchor,
        cfg.history_days_or_default() as usize,
    );
    let metrics = MetricsService::new(Arc::new(generator.generate()));

    // --- Events: assistant effects -> cluster registry worker ---
    let (bus, events_rx) = ChannelEventBus::channel(DEFAULT_EVENT_QUEUE_SIZE);
    let events: Arc<dyn EventPort> = Arc::new(bus);
    let registry = ClusterRegistry::new(events_rx, anchor);
    let clusters = registry.clusters();
    tokio::spawn(registry.run());

    // --- Services ---
    let chat = Arc::new(ChatService::new(
        CommandRouter::new(metrics.clone()),
        events,
        cfg.typing_delay(),
        cfg.effect_delay(),
    ));
    info!(
        typing_delay_ms = cfg.typing_delay().as_millis() as u64,
        effect_delay_ms = cfg.effect_delay().as_millis() as u64,
        "assistant ready"
    );

    let export_dir = PathBuf::from(cfg.data_dir_or_default()).join("exports");
    let exporter: Arc<dyn ExportPort> = Arc::new(FsExporter::new(&export_dir));
    let export = Arc::new(ExportService::new(metrics.clone(), exporter));
    info!(path = %export_dir.display(), "export directory");

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(metrics, chat, export, clusters));

    // --- Run (main menu -> Chat / Dashboard / Export) ---
    input_port.run().await?;

    Ok(())
}
