//! Access to the remote COFFEE router
//!
//! The router is an external collaborator reached over two HTTP contracts:
//!
//! - ranked: `POST /route`
//! - agent: `POST /agent-route`, plus `GET /all-tools` for the catalog
//!
//! `HttpRetrievalService` talks to the real router with reqwest; the
//! `MockRetrievalService` is kept for tests and offline demos.

mod error;
mod http;
mod mock;
mod traits;

pub use error::{CatalogLoadError, FailureKind, RetrievalError, RetrievalResult};
pub use http::HttpRetrievalService;
pub use mock::{MockCall, MockConfig, MockEndpoint, MockOutcome, MockRetrievalService};
pub use traits::{
    AgentRouteRequest, AgentRouteResponse, CatalogResponse, RetrievalService, RouteReply,
    RouteRequest, RouteResponse,
};

use std::sync::Arc;

use crate::config::CoffeeConfig;
use crate::logging::Logger;

/// Build the service a config points at
///
/// A base URL of `mock://` selects the offline mock, which answers from a
/// small sample catalog.
pub fn create_service(config: &CoffeeConfig, logger: Arc<dyn Logger>) -> Arc<dyn RetrievalService> {
    let base_url = config.normalized_base_url();
    if base_url.starts_with("mock:") {
        Arc::new(MockRetrievalService::offline(logger))
    } else {
        Arc::new(HttpRetrievalService::new(base_url, logger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_service() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());

        let http = create_service(&CoffeeConfig::default(), logger.clone());
        assert_eq!(http.name(), "http");

        let mock = create_service(&CoffeeConfig::default().with_base_url("mock://"), logger);
        assert_eq!(mock.name(), "mock");
    }
}
