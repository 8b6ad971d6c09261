//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AppEvent, DomainError};
use std::path::PathBuf;

/// Event bus. Delivers application events to whatever UI is subscribed.
#[async_trait::async_trait]
pub trait EventPort: Send + Sync {
    /// Publish one event. Fails only when no subscriber can ever receive it.
    async fn publish(&self, event: AppEvent) -> Result<(), DomainError>;
}

/// Export sink. Persist a rendered export (e.g. leads CSV).
#[async_trait::async_trait]
pub trait ExportPort: Send + Sync {
    /// Write `contents` under `file_name` and return the final path.
    async fn write_export(&self, file_name: &str, contents: &str)
    -> Result<PathBuf, DomainError>;
}
