//! Chat session orchestration: history, typing delay, routing and effect dispatch.

use super::router::CommandRouter;
use crate::domain::{AppEvent, ChatAction, ChatMessage, Effect, Role, SessionState};
use crate::ports::EventPort;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Message list plus conversational state for one user.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn push(&mut self, role: Role, content: String, actions: Vec<ChatAction>) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage {
            id: self.next_id,
            role,
            content,
            actions,
        };
        self.messages.push(message.clone());
        message
    }
}

pub struct ChatService {
    router: CommandRouter,
    events: Arc<dyn EventPort>,
    typing_delay: Duration,
    effect_delay: Duration,
}

impl ChatService {
    pub fn new(
        router: CommandRouter,
        events: Arc<dyn EventPort>,
        typing_delay: Duration,
        effect_delay: Duration,
    ) -> Self {
        Self {
            router,
            events,
            typing_delay,
            effect_delay,
        }
    }

    /// One turn. Blank input is ignored and returns `None`.
    ///
    /// The user message is appended first, then after the typing delay the
    /// assistant reply. Effects are published from a background task after the
    /// effect delay, so the reply is returned without waiting for them.
    pub async fn send_message(&self, session: &mut ChatSession, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        session.push(Role::User, text.to_string(), Vec::new());

        tokio::time::sleep(self.typing_delay).await;
        let routed = self.router.route(text, &mut session.state);
        info!(subagent = routed.subagent, "assistant reply");
        let reply = routed.reply;
        let message = session.push(Role::Assistant, reply.content, reply.actions);

        if !reply.effects.is_empty() {
            tokio::spawn(dispatch_effects(
                Arc::clone(&self.events),
                reply.effects,
                self.effect_delay,
            ));
        }
        Some(message)
    }

    /// Turn an inbound UI event into a synthetic user message. Events the
    /// assistant emits itself are ignored.
    pub async fn handle_event(
        &self,
        session: &mut ChatSession,
        event: &AppEvent,
    ) -> Option<ChatMessage> {
        let text = match event {
            AppEvent::DiscussCluster(e) => format!("Tell me about the {} cluster", e.category),
            AppEvent::CreateCluster(e) => {
                format!("I'm planning to create a {} topical cluster", e.industry)
            }
            AppEvent::ClusterCreated(_) => return None,
        };
        debug!(event = event.name(), "ui event");
        self.send_message(session, &text).await
    }
}

async fn dispatch_effects(events: Arc<dyn EventPort>, effects: Vec<Effect>, delay: Duration) {
    for effect in effects {
        tokio::time::sleep(delay).await;
        let event = match effect {
            Effect::ClusterCreated(created) => {
                debug!(industry = %created.industry, name = %created.name, "publishing cluster-created");
                AppEvent::ClusterCreated(created)
            }
        };
        if let Err(e) = events.publish(event).await {
            error!(error = %e, "effect dispatch failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::RecordingEventBus;
    use crate::domain::{CreateCluster, DiscussCluster};
    use crate::usecases::metrics::test_support::service;
    use tokio::time::Instant;

    fn chat(bus: Arc<RecordingEventBus>) -> ChatService {
        ChatService::new(
            CommandRouter::new(service()),
            bus,
            Duration::from_millis(900),
            Duration::from_millis(500),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_typing_delay() {
        let bus = Arc::new(RecordingEventBus::default());
        let svc = chat(Arc::clone(&bus));
        let mut session = ChatSession::new();

        let started = Instant::now();
        let reply = svc
            .send_message(&mut session, "/traffic overview")
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(900));
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
        assert!(session.messages()[0].id < reply.id);
        assert!(bus.events().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_ignored() {
        let svc = chat(Arc::new(RecordingEventBus::default()));
        let mut session = ChatSession::new();
        assert!(svc.send_message(&mut session, "   ").await.is_none());
        assert!(session.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_publishes_cluster_created() {
        let bus = Arc::new(RecordingEventBus::default());
        let svc = chat(Arc::clone(&bus));
        let mut session = ChatSession::new();

        let proposal = svc
            .send_message(&mut session, "I'm planning to create a Healthcare topical cluster")
            .await
            .unwrap();
        assert!(proposal.content.contains("Healthcare Content Marketing Playbook"));
        assert!(session.state().is_awaiting_confirmation());
        assert!(bus.events().await.is_empty());

        let confirm = proposal.actions[0].message.clone();
        let started = Instant::now();
        let reply = svc.send_message(&mut session, &confirm).await.unwrap();
        assert!(!session.state().is_awaiting_confirmation());
        // The reply comes back after the typing delay alone; the event follows later.
        assert!(started.elapsed() < Duration::from_millis(1400));
        assert!(reply.content.contains("Healthcare Content Marketing Playbook"));
        assert!(bus.events().await.is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        let events = bus.events().await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            AppEvent::ClusterCreated(c) => {
                assert_eq!(c.industry, "Healthcare");
                assert_eq!(c.name, "Healthcare Content Marketing Playbook");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ui_events_become_user_messages() {
        let svc = chat(Arc::new(RecordingEventBus::default()));
        let mut session = ChatSession::new();

        svc.handle_event(
            &mut session,
            &AppEvent::DiscussCluster(DiscussCluster {
                category: "AI Search".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(session.messages()[0].content, "Tell me about the AI Search cluster");
        assert!(session.messages()[1].content.starts_with("**AI Search**"));

        svc.handle_event(
            &mut session,
            &AppEvent::CreateCluster(CreateCluster {
                industry: "Legal".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            session.messages()[2].content,
            "I'm planning to create a Legal topical cluster"
        );
        assert_eq!(session.state().pending.as_ref().unwrap().name, "Legal Content Hub");
    }
}
