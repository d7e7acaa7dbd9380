//! Append-only conversation transcript

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::events::{EventSink, SessionEvent};
use crate::types::Message;

/// Ordered, append-only sequence of messages
///
/// There is no removal, edit or reordering; the transcript only grows for the
/// life of the session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: RwLock<Vec<Message>>,
    events: EventSink,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that publishes appends on `events`
    pub fn with_events(events: EventSink) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Append a message and return its index
    pub fn append(&self, message: Message) -> usize {
        let index = {
            let mut messages = self.messages.write();
            messages.push(message.clone());
            messages.len() - 1
        };
        self.events.emit(SessionEvent::MessageAppended { index, message });
        index
    }

    /// Copy of the transcript in insertion order
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn get(&self, index: usize) -> Option<Message> {
        self.messages.read().get(index).cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
