//! Conversation transcript and the events renderers follow

mod events;
mod store;

pub use events::{EventSink, SessionEvent, EVENT_CHANNEL_CAPACITY};
pub use store::ConversationStore;
