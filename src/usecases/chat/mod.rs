//! Conversational assistant: command router, subagent handlers and the chat session service.

pub mod handlers;
pub mod proposals;
pub mod router;
pub mod service;

pub use router::{CommandRouter, Input, Routed};
pub use service::{ChatService, ChatSession};
