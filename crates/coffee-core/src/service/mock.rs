//! Mock retrieval service for testing
//!
//! Deterministic, configurable router replies without network access. Each
//! endpoint is scripted independently and every call is recorded.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::error::{RetrievalError, RetrievalResult};
use super::traits::{AgentRouteResponse, RetrievalService, RouteResponse};
use crate::logging::Logger;
use crate::types::{ToolCatalogEntry, ToolId, ToolResult};

/// What a mocked endpoint does when called
#[derive(Debug, Clone)]
pub enum MockOutcome<T> {
    /// 2xx with this body
    Respond(T),
    /// Non-2xx with this status
    Status(u16),
    /// Transport failure with this message
    Fail(String),
}

impl<T: Clone> MockOutcome<T> {
    fn resolve(&self) -> RetrievalResult<T> {
        match self {
            MockOutcome::Respond(body) => Ok(body.clone()),
            MockOutcome::Status(status) => Err(RetrievalError::status(*status)),
            MockOutcome::Fail(message) => Err(RetrievalError::Transport(message.clone())),
        }
    }
}

/// Which endpoint a recorded call hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEndpoint {
    Route,
    AgentRoute,
    AllTools,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub endpoint: MockEndpoint,
    pub query: Option<String>,
    pub top_k: Option<u32>,
}

/// Scripted replies for each endpoint
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub route: MockOutcome<RouteResponse>,
    pub agent_route: MockOutcome<AgentRouteResponse>,
    pub all_tools: MockOutcome<Vec<ToolCatalogEntry>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            route: MockOutcome::Respond(RouteResponse::default()),
            agent_route: MockOutcome::Respond(AgentRouteResponse::default()),
            all_tools: MockOutcome::Respond(Vec::new()),
        }
    }
}

/// Mock COFFEE router
pub struct MockRetrievalService {
    config: MockConfig,
    calls: Mutex<Vec<MockCall>>,
    gate: Option<Arc<Notify>>,
    logger: Arc<dyn Logger>,
}

impl MockRetrievalService {
    /// Every endpoint answers 2xx with no tools
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_config(MockConfig::default(), logger)
    }

    pub fn with_config(config: MockConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
            gate: None,
            logger,
        }
    }

    /// Canned router for offline use (`mock://` base URL)
    ///
    /// Every endpoint answers with the same small sample catalog, so both
    /// modes produce a tool list and non-zero savings.
    pub fn offline(logger: Arc<dyn Logger>) -> Self {
        let catalog = offline_catalog();
        let ranked: Vec<ToolResult> = catalog
            .iter()
            .take(3)
            .zip([0.92, 0.81, 0.67])
            .map(|(entry, score)| to_result(entry, score))
            .collect();
        let agent = AgentRouteResponse {
            tools: ranked.iter().take(2).cloned().collect(),
            explanation: "These tools cover searching and reviewing code.".to_string(),
            reasoning: "Offline sample reply; no router was contacted.".to_string(),
            intent_summary: "work with code repositories".to_string(),
        };

        Self::new(logger)
            .with_route(MockOutcome::Respond(RouteResponse { tools: ranked }))
            .with_agent_route(MockOutcome::Respond(agent))
            .with_catalog(MockOutcome::Respond(catalog))
    }

    /// Script `/route` to return these tools
    pub fn ranked(tools: Vec<ToolResult>, logger: Arc<dyn Logger>) -> Self {
        Self::new(logger).with_route(MockOutcome::Respond(RouteResponse { tools }))
    }

    /// Script `/agent-route` to return this reply
    pub fn agent(reply: AgentRouteResponse, logger: Arc<dyn Logger>) -> Self {
        Self::new(logger).with_agent_route(MockOutcome::Respond(reply))
    }

    pub fn with_route(mut self, outcome: MockOutcome<RouteResponse>) -> Self {
        self.config.route = outcome;
        self
    }

    pub fn with_agent_route(mut self, outcome: MockOutcome<AgentRouteResponse>) -> Self {
        self.config.agent_route = outcome;
        self
    }

    pub fn with_catalog(mut self, outcome: MockOutcome<Vec<ToolCatalogEntry>>) -> Self {
        self.config.all_tools = outcome;
        self
    }

    /// Hold every reply until `gate` is notified
    ///
    /// Lets a test observe the session while a request is in flight.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, endpoint: MockEndpoint) -> usize {
        self.calls.lock().iter().filter(|c| c.endpoint == endpoint).count()
    }

    async fn record(&self, call: MockCall) {
        self.logger.debug(&format!("MockRetrievalService: {:?}", call.endpoint));
        self.calls.lock().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn offline_catalog() -> Vec<ToolCatalogEntry> {
    [
        (1, "GitHub Search", "Search GitHub repositories, issues and code by keyword, language or owner."),
        (2, "Code Review", "Summarize a pull request diff and flag risky changes for a reviewer."),
        (3, "Repo Stats", "Report stars, contributors and commit activity for a repository."),
        (4, "Slack Post", "Send a message to a Slack channel or user."),
        (5, "Calendar", "Create, move and list calendar events."),
        (6, "Weather", "Current conditions and a short forecast for a city."),
    ]
    .into_iter()
    .map(|(id, name, description)| ToolCatalogEntry::new(id as i64, description).with_name(name))
    .collect()
}

fn to_result(entry: &ToolCatalogEntry, score: f64) -> ToolResult {
    let id = entry.id.clone().unwrap_or(ToolId::Number(0));
    ToolResult::new(id, entry.name.clone().unwrap_or_default(), score).with_description(entry.description.clone())
}

#[async_trait]
impl RetrievalService for MockRetrievalService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn route(&self, query: &str, top_k: u32) -> RetrievalResult<RouteResponse> {
        self.record(MockCall {
            endpoint: MockEndpoint::Route,
            query: Some(query.to_string()),
            top_k: Some(top_k),
        })
        .await;
        self.config.route.resolve()
    }

    async fn agent_route(&self, query: &str) -> RetrievalResult<AgentRouteResponse> {
        self.record(MockCall {
            endpoint: MockEndpoint::AgentRoute,
            query: Some(query.to_string()),
            top_k: None,
        })
        .await;
        self.config.agent_route.resolve()
    }

    async fn all_tools(&self) -> RetrievalResult<Vec<ToolCatalogEntry>> {
        self.record(MockCall {
            endpoint: MockEndpoint::AllTools,
            query: None,
            top_k: None,
        })
        .await;
        self.config.all_tools.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    #[tokio::test]
    async fn test_default_replies_are_empty() {
        let mock = MockRetrievalService::new(test_logger());
        assert!(mock.route("q", 5).await.unwrap().tools.is_empty());
        assert!(mock.agent_route("q").await.unwrap().tools.is_empty());
        assert!(mock.all_tools().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_replies_have_tools() {
        let mock = MockRetrievalService::offline(test_logger());

        let ranked = mock.route("find code", 5).await.unwrap();
        assert_eq!(ranked.tools.len(), 3);
        assert_eq!(ranked.tools[0].name, "GitHub Search");

        let agent = mock.agent_route("find code").await.unwrap();
        assert_eq!(agent.tools.len(), 2);
        assert!(!agent.explanation.is_empty());

        let catalog = mock.all_tools().await.unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(agent.tools.iter().all(|t| catalog.iter().any(|e| e.id.as_ref() == Some(&t.id))));
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let mock = MockRetrievalService::new(test_logger())
            .with_route(MockOutcome::Status(500))
            .with_catalog(MockOutcome::Fail("connection refused".to_string()));

        assert!(matches!(mock.route("q", 5).await, Err(RetrievalError::Status { status: 500 })));
        assert!(matches!(mock.all_tools().await, Err(RetrievalError::Transport(_))));
    }

    #[tokio::test]
    async fn test_calls_recorded() {
        let mock = MockRetrievalService::ranked(vec![ToolResult::new(1, "a", 0.5)], test_logger());
        mock.route("find things", 3).await.unwrap();
        mock.all_tools().await.unwrap();

        assert_eq!(
            mock.calls()[0],
            MockCall {
                endpoint: MockEndpoint::Route,
                query: Some("find things".to_string()),
                top_k: Some(3),
            }
        );
        assert_eq!(mock.call_count(MockEndpoint::AllTools), 1);
        assert_eq!(mock.call_count(MockEndpoint::AgentRoute), 0);
    }

    #[tokio::test]
    async fn test_gate_holds_reply() {
        let gate = Arc::new(Notify::new());
        let mock = Arc::new(MockRetrievalService::new(test_logger()).with_gate(gate.clone()));

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.route("q", 1).await })
        };
        while mock.call_count(MockEndpoint::Route) == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished());

        gate.notify_one();
        assert!(task.await.unwrap().is_ok());
    }
}
