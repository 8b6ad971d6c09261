//! Implements EventPort over a bounded tokio mpsc channel.
//!
//! The receiving end is owned by a worker such as the cluster registry.

use crate::domain::{AppEvent, DomainError};
use crate::ports::EventPort;
use tokio::sync::mpsc;
use tracing::debug;

/// Default channel capacity. A full channel makes `publish` wait (backpressure).
pub const DEFAULT_EVENT_QUEUE_SIZE: usize = 64;

pub struct ChannelEventBus {
    tx: mpsc::Sender<AppEvent>,
}

impl ChannelEventBus {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Bus plus the receiver to hand to a consumer.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait::async_trait]
impl EventPort for ChannelEventBus {
    async fn publish(&self, event: AppEvent) -> Result<(), DomainError> {
        let name = event.name();
        self.tx
            .send(event)
            .await
            .map_err(|_| DomainError::Events(format!("no subscriber for {}", name)))?;
        debug!(event = name, "event published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateCluster;

    #[tokio::test]
    async fn delivers_to_receiver() {
        let (bus, mut rx) = ChannelEventBus::channel(4);
        let event = AppEvent::CreateCluster(CreateCluster {
            industry: "Retail".into(),
        });
        bus.publish(event.clone()).await.unwrap();
        assert_eq!(rx.recv().await, Some(event));
    }

    #[tokio::test]
    async fn closed_receiver_is_an_error() {
        let (bus, rx) = ChannelEventBus::channel(1);
        drop(rx);
        let err = bus
            .publish(AppEvent::CreateCluster(CreateCluster {
                industry: "Retail".into(),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Events(_)));
    }
}
