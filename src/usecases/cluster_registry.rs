//! Async task: reads AppEvents from an mpsc channel and records created clusters.
//!
//! The list is shared behind an `RwLock` so the UI can read it while the worker runs.

use crate::domain::{AppEvent, CreatedCluster};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};

/// Shared, append-only list of clusters created in this session.
pub type ClusterList = Arc<RwLock<Vec<CreatedCluster>>>;

/// Cluster registry worker. Consumes the event channel until every sender is dropped.
pub struct ClusterRegistry {
    rx: mpsc::Receiver<AppEvent>,
    clusters: ClusterList,
    created_on: NaiveDate,
}

impl ClusterRegistry {
    /// `created_on` stamps every entry; the app passes the dashboard's as-of date.
    pub fn new(rx: mpsc::Receiver<AppEvent>, created_on: NaiveDate) -> Self {
        Self {
            rx,
            clusters: ClusterList::default(),
            created_on,
        }
    }

    /// Handle for readers. Stays valid after `run` consumes the worker.
    pub fn clusters(&self) -> ClusterList {
        Arc::clone(&self.clusters)
    }

    /// Run the worker. Processes until channel is closed.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            match event {
                AppEvent::ClusterCreated(created) => {
                    info!(industry = %created.industry, name = %created.name, "cluster created");
                    let entry = CreatedCluster::from_event(created, self.created_on);
                    self.clusters.write().await.push(entry);
                }
                other => debug!(event = other.name(), "ignored by cluster registry"),
            }
        }
        info!("cluster registry finished (channel closed)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClusterCreated, DiscussCluster};

    #[tokio::test]
    async fn records_only_cluster_created_events() {
        let (tx, rx) = mpsc::channel(8);
        let day = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let registry = ClusterRegistry::new(rx, day);
        let clusters = registry.clusters();
        let worker = tokio::spawn(registry.run());

        tx.send(AppEvent::DiscussCluster(DiscussCluster {
            category: "SEO Strategy".into(),
        }))
        .await
        .unwrap();
        tx.send(AppEvent::ClusterCreated(ClusterCreated {
            industry: "Healthcare".into(),
            name: "Healthcare Content Marketing Playbook".into(),
            description: "d".into(),
        }))
        .await
        .unwrap();
        drop(tx);
        worker.await.unwrap();

        let list = clusters.read().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].industry, "Healthcare");
        assert_eq!(list[0].created_on, day);
    }
}
