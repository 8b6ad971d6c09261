//! Event bus adapters. Implement EventPort.
//!
//! Channel-backed bus for the running app; recording bus for tests.

pub mod channel_bus;
pub mod memory;

pub use channel_bus::{ChannelEventBus, DEFAULT_EVENT_QUEUE_SIZE};
pub use memory::RecordingEventBus;
