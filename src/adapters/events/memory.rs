//! In-memory EventPort that records every published event. Used in tests.

use crate::domain::{AppEvent, DomainError};
use crate::ports::EventPort;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<AppEvent>>,
}

impl RecordingEventBus {
    /// Snapshot of everything published so far, in order.
    pub async fn events(&self) -> Vec<AppEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl EventPort for RecordingEventBus {
    async fn publish(&self, event: AppEvent) -> Result<(), DomainError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
