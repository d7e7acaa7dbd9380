//! Session state owned by one conversation

use std::sync::Arc;

use tokio::sync::broadcast;

use super::busy::BusyFlag;
use crate::catalog::ToolCatalog;
use crate::conversation::{ConversationStore, EventSink, SessionEvent};
use crate::logging::Logger;
use crate::types::Message;

/// Everything a conversation owns: transcript, busy flag and catalog cache
///
/// Shared between the orchestrator, which mutates it, and renderers, which
/// read snapshots or subscribe to events.
#[derive(Debug)]
pub struct Session {
    store: ConversationStore,
    busy: BusyFlag,
    catalog: ToolCatalog,
    events: EventSink,
}

impl Session {
    /// Empty session
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        let events = EventSink::new();
        Self {
            store: ConversationStore::with_events(events.clone()),
            busy: BusyFlag::new(events.clone()),
            catalog: ToolCatalog::new(logger),
            events,
        }
    }

    /// Session whose transcript opens with an assistant greeting
    pub fn with_greeting(greeting: Option<&str>, logger: Arc<dyn Logger>) -> Self {
        let session = Self::new(logger);
        if let Some(text) = greeting.filter(|g| !g.trim().is_empty()) {
            session.store.append(Message::assistant(text));
        }
        session
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub(crate) fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    /// True while a query is in flight; the UI disables input meanwhile
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Transcript snapshot for rendering
    pub fn messages(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    /// Follow appends and busy transitions
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
