//! Application use cases. Orchestrate domain logic via ports.

pub mod chat;
pub mod cluster_registry;
pub mod export_service;
pub mod metrics;

pub use chat::{ChatService, ChatSession, CommandRouter};
pub use cluster_registry::ClusterRegistry;
pub use export_service::ExportService;
pub use metrics::MetricsService;
