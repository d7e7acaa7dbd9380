//! Core types shared by the session, metrics and service layers

mod message;
mod metrics;
mod tool;

pub use message::{AgentReasoning, Message, MessageKind, MessageRole, Routing, Visualization};
pub use metrics::TokenMetrics;
pub use tool::{ToolCatalogEntry, ToolId, ToolResult};
