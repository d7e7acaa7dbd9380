//! reqwest-backed client for the COFFEE router

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::{RetrievalError, RetrievalResult};
use super::traits::{
    AgentRouteRequest, AgentRouteResponse, CatalogResponse, RetrievalService, RouteRequest,
    RouteResponse,
};
use crate::logging::Logger;
use crate::types::ToolCatalogEntry;

/// HTTP client for `/route`, `/agent-route` and `/all-tools`
///
/// No timeout or retry is applied here; whatever the transport reports is
/// surfaced as a [`RetrievalError::Network`].
pub struct HttpRetrievalService {
    client: reqwest::Client,
    base_url: String,
    logger: Arc<dyn Logger>,
}

impl HttpRetrievalService {
    pub fn new(base_url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, logger)
    }

    /// Use a preconfigured client (proxy, custom TLS, transport timeout)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            logger,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(&self, path: &str, response: reqwest::Response) -> RetrievalResult<T> {
        let status = response.status();
        if !status.is_success() {
            self.logger.warn(&format!("[HttpRetrievalService] {} returned {}", path, status));
            return Err(RetrievalError::status(status.as_u16()));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            self.logger.error(&format!("[HttpRetrievalService] {} sent malformed JSON: {}", path, e));
            RetrievalError::InvalidResponse(e)
        })
    }
}

#[async_trait]
impl RetrievalService for HttpRetrievalService {
    fn name(&self) -> &str {
        "http"
    }

    async fn route(&self, query: &str, top_k: u32) -> RetrievalResult<RouteResponse> {
        self.logger.debug(&format!("[HttpRetrievalService] POST /route top_k={}", top_k));
        let response = self
            .client
            .post(self.url("/route"))
            .json(&RouteRequest { query, top_k })
            .send()
            .await?;
        self.decode("/route", response).await
    }

    async fn agent_route(&self, query: &str) -> RetrievalResult<AgentRouteResponse> {
        self.logger.debug("[HttpRetrievalService] POST /agent-route");
        let response = self
            .client
            .post(self.url("/agent-route"))
            .json(&AgentRouteRequest { query })
            .send()
            .await?;
        self.decode("/agent-route", response).await
    }

    async fn all_tools(&self) -> RetrievalResult<Vec<ToolCatalogEntry>> {
        self.logger.debug("[HttpRetrievalService] GET /all-tools");
        let response = self.client.get(self.url("/all-tools")).send().await?;
        let catalog: CatalogResponse = self.decode("/all-tools", response).await?;
        Ok(catalog.tools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::service::FailureKind;
    use crate::types::ToolId;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn service(url: &str) -> HttpRetrievalService {
        HttpRetrievalService::new(url, Arc::new(NoOpLogger::new()))
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(service("http://localhost:8000/").base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_route_sends_query_and_top_k() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/route")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"query": "search for code repositories", "top_k": 5})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tools":[{"id":1,"name":"GitHub Search","score":0.92}]}"#)
            .create_async()
            .await;

        let response = service(&server.url())
            .route("search for code repositories", 5)
            .await
            .unwrap();

        assert_eq!(response.tools.len(), 1);
        assert_eq!(response.tools[0].id, ToolId::Number(1));
        assert_eq!(response.tools[0].name, "GitHub Search");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/route")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let err = service(&server.url()).route("anything", 5).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Status { status: 503 }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/agent-route")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = service(&server.url()).agent_route("anything").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_agent_route_fields() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/agent-route")
            .match_body(Matcher::Json(json!({"query": "ship a release"})))
            .with_status(200)
            .with_body(
                json!({
                    "tools": [{"id": "gh", "name": "GitHub Releases", "score": 0.8}],
                    "explanation": "Picked the release tool.",
                    "reasoning": "The user wants to publish a release.",
                    "intent_summary": "publish release"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = service(&server.url()).agent_route("ship a release").await.unwrap();
        assert_eq!(response.tools.len(), 1);
        assert_eq!(response.explanation, "Picked the release tool.");
        assert_eq!(response.reasoning, "The user wants to publish a release.");
        assert_eq!(response.intent_summary, "publish release");
    }

    #[tokio::test]
    async fn test_all_tools() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/all-tools")
            .with_status(200)
            .with_body(
                json!({"tools": [
                    {"id": 1, "name": "a", "description": "first tool"},
                    {"id": 2, "name": "b", "description": "second tool", "extra": true}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let catalog = service(&server.url()).all_tools().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].description, "second tool");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        // Port 9 (discard) is essentially never listening on loopback
        let err = service("http://127.0.0.1:9").route("anything", 5).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(err.to_string().starts_with("Network error"));
    }
}
