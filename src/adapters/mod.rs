//! Infrastructure adapters. Implement outbound ports.
//!
//! Synthetic data, event bus, filesystem export, terminal UI. Map errors to DomainError.

pub mod events;
pub mod export;
pub mod synthetic;
pub mod ui;
