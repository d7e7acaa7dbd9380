//! Conversation message types

use serde::{Deserialize, Serialize};

use super::metrics::TokenMetrics;
use super::tool::ToolResult;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Reasoning supplied by the agent endpoint, copied verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReasoning {
    pub reasoning: String,
    pub intent_summary: String,
}

/// How the tools of a visualization were selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Routing {
    /// Plain ranked list from `/route`
    Ranked,
    /// Agent-reasoned selection from `/agent-route`
    Agent(AgentReasoning),
}

/// Tool list plus token metrics rendered under an assistant turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    tools: Vec<ToolResult>,
    metrics: TokenMetrics,
    routing: Routing,
}

impl Visualization {
    pub fn tools(&self) -> &[ToolResult] {
        &self.tools
    }

    pub fn metrics(&self) -> &TokenMetrics {
        &self.metrics
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }
}

/// Payload of a message beyond its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageKind {
    /// Text only (user input, greeting)
    Plain,
    /// A failed request
    Error,
    /// A successful retrieval with tools and metrics
    Visualization(Visualization),
}

/// A single conversation turn
///
/// Messages are immutable once built; the store only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    text: String,
    #[serde(flatten)]
    kind: MessageKind,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            kind: MessageKind::Plain,
        }
    }

    /// Create a plain assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
            kind: MessageKind::Plain,
        }
    }

    /// Create an assistant error message
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    /// Create an assistant message carrying tools and metrics
    ///
    /// Returns `None` for an empty tool list: a visualization always has
    /// something to show.
    pub fn visualization(
        text: impl Into<String>,
        tools: Vec<ToolResult>,
        metrics: TokenMetrics,
        routing: Routing,
    ) -> Option<Self> {
        if tools.is_empty() {
            return None;
        }
        Some(Self {
            role: MessageRole::Assistant,
            text: text.into(),
            kind: MessageKind::Visualization(Visualization {
                tools,
                metrics,
                routing,
            }),
        })
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, MessageKind::Error)
    }

    pub fn has_visualization(&self) -> bool {
        matches!(self.kind, MessageKind::Visualization(_))
    }

    pub fn visualization_data(&self) -> Option<&Visualization> {
        match &self.kind {
            MessageKind::Visualization(v) => Some(v),
            _ => None,
        }
    }

    pub fn tools(&self) -> Option<&[ToolResult]> {
        self.visualization_data().map(Visualization::tools)
    }

    pub fn metrics(&self) -> Option<&TokenMetrics> {
        self.visualization_data().map(Visualization::metrics)
    }

    fn agent_reasoning(&self) -> Option<&AgentReasoning> {
        match self.visualization_data()?.routing() {
            Routing::Agent(reasoning) => Some(reasoning),
            Routing::Ranked => None,
        }
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.agent_reasoning().map(|r| r.reasoning.as_str())
    }

    pub fn intent_summary(&self) -> Option<&str> {
        self.agent_reasoning().map(|r| r.intent_summary.as_str())
    }
}
