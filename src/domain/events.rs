//! Application-wide events exchanged between the UI and the assistant.
//!
//! Serialised as `{"type": "<event-name>", "detail": {...}}`; names and payload
//! fields are the contract with any UI subscriber.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussCluster {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCluster {
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCreated {
    pub industry: String,
    pub name: String,
    pub description: String,
}

/// A cluster added through the assistant, as kept by the cluster registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCluster {
    pub industry: String,
    pub name: String,
    pub description: String,
    pub created_on: NaiveDate,
}

impl CreatedCluster {
    pub fn from_event(event: ClusterCreated, created_on: NaiveDate) -> Self {
        Self {
            industry: event.industry,
            name: event.name,
            description: event.description,
            created_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum AppEvent {
    #[serde(rename = "discuss-cluster")]
    DiscussCluster(DiscussCluster),
    #[serde(rename = "create-cluster")]
    CreateCluster(CreateCluster),
    #[serde(rename = "cluster-created")]
    ClusterCreated(ClusterCreated),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::DiscussCluster(_) => "discuss-cluster",
            AppEvent::CreateCluster(_) => "create-cluster",
            AppEvent::ClusterCreated(_) => "cluster-created",
        }
    }
}
