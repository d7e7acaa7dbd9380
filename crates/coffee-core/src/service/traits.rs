//! Retrieval service trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::RetrievalResult;
use crate::types::{ToolCatalogEntry, ToolResult};

/// `POST /route` body
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest<'a> {
    pub query: &'a str,
    pub top_k: u32,
}

/// `POST /route` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub tools: Vec<ToolResult>,
}

/// `POST /agent-route` body
#[derive(Debug, Clone, Serialize)]
pub struct AgentRouteRequest<'a> {
    pub query: &'a str,
}

/// `POST /agent-route` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentRouteResponse {
    #[serde(default)]
    pub tools: Vec<ToolResult>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub intent_summary: String,
}

/// `GET /all-tools` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub tools: Vec<ToolCatalogEntry>,
}

/// A normalized router reply
///
/// Both endpoints end up here so the orchestrator has one pipeline.
#[derive(Debug, Clone)]
pub enum RouteReply {
    Ranked(RouteResponse),
    Agent(AgentRouteResponse),
}

impl RouteReply {
    pub fn tools(&self) -> &[ToolResult] {
        match self {
            RouteReply::Ranked(r) => &r.tools,
            RouteReply::Agent(r) => &r.tools,
        }
    }
}

/// The COFFEE router as seen by the client
///
/// Implementations report HTTP status and transport failures; deciding that an
/// empty tool list is a failure is left to the caller.
#[async_trait]
pub trait RetrievalService: Send + Sync {
    /// Short name for logs ("http", "mock")
    fn name(&self) -> &str;

    /// Ranked tool list for a query
    async fn route(&self, query: &str, top_k: u32) -> RetrievalResult<RouteResponse>;

    /// Agent-reasoned tool selection for a query
    async fn agent_route(&self, query: &str) -> RetrievalResult<AgentRouteResponse>;

    /// The full tool catalog
    async fn all_tools(&self) -> RetrievalResult<Vec<ToolCatalogEntry>>;
}
