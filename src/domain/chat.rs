//! Conversation types shared by the command router and the chat service.

use super::events::ClusterCreated;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Suggested follow-up. Choosing it sends `message` as the next user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    pub label: String,
    pub message: String,
}

impl ChatAction {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ChatAction>,
}

/// A cluster proposal waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterProposal {
    pub industry: String,
    pub name: String,
    pub description: String,
}

/// Router state carried by a session: idle, or awaiting confirmation of a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub pending: Option<ClusterProposal>,
}

impl SessionState {
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }
}

/// Side effect requested by a handler. The hosting application dispatches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClusterCreated(ClusterCreated),
}

/// What a handler produces for one user turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub content: String,
    pub actions: Vec<ChatAction>,
    pub effects: Vec<Effect>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, label: &str, message: &str) -> Self {
        self.actions.push(ChatAction::new(label, message));
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
