//! Core domain layer. No external I/O dependencies.
//!
//! Entities, static catalogs and the date-window rules live here. Dependencies flow inward.

pub mod analytics;
pub mod catalog;
pub mod chat;
pub mod entities;
pub mod errors;
pub mod events;
pub mod keys;
pub mod window;

pub use analytics::{
    ChartPoint, ClusterPage, ClusterSummary, Coverage, Freshness, FreshnessBucket, FunnelStage,
    IndustryIntelligence, MetricValue, PageStatus, Priority, ProductionInsight, StageBreakdown,
    TopMovers,
};
pub use chat::{ChatAction, ChatMessage, ClusterProposal, Effect, Reply, Role, SessionState};
pub use entities::{
    AiEngine, DailyAiPoint, DailyCtaPoint, DailyTrafficPoint, Dataset, Lead, LeadStatus, Page,
    PageDailyPoint, TrafficProfile,
};
pub use errors::DomainError;
pub use events::{AppEvent, ClusterCreated, CreateCluster, CreatedCluster, DiscussCluster};
pub use keys::{ChartKey, MetricKey};
pub use window::{DateRange, Dated, filter_by_date_range, previous_period};
