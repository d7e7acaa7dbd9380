//! Session events observed by renderers

use tokio::sync::broadcast;

use crate::types::Message;

/// Capacity of the event channel; slow receivers see `Lagged` past this
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something a renderer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A message was appended at `index`
    MessageAppended { index: usize, message: Message },
    /// The busy flag changed; input should be disabled while `true`
    BusyChanged(bool),
}

/// Sending half shared by the store and the busy flag
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event; having no subscribers is not an error
    pub fn emit(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}
