//! Tool descriptor types returned by the COFFEE router

use serde::{Deserialize, Serialize};

/// Tool identifier as sent by the router
///
/// The router has shipped both numeric and string ids, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolId::Number(n) => write!(f, "{}", n),
            ToolId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ToolId {
    fn from(n: i64) -> Self {
        ToolId::Number(n)
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        ToolId::Text(s.to_string())
    }
}

impl From<String> for ToolId {
    fn from(s: String) -> Self {
        ToolId::Text(s)
    }
}

/// A ranked candidate tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Unique within one response
    pub id: ToolId,
    /// Display name
    pub name: String,
    /// Relevance confidence in [0, 1]
    #[serde(default)]
    pub score: f64,
    /// Full description, when the router includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToolResult {
    /// Create a tool result without a description
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Score as a whole percentage, clamped to 0..=100
    pub fn score_percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// One entry of the full tool catalog (`GET /all-tools`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ToolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Used to size the "without offload" baseline
    #[serde(default)]
    pub description: String,
}

impl ToolCatalogEntry {
    pub fn new(id: impl Into<ToolId>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            description: description.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
