//! Request orchestration: user text in, assistant turn out

use std::sync::Arc;

use super::state::Session;
use crate::catalog::CatalogLoad;
use crate::config::{CoffeeConfig, ModeConfig};
use crate::logging::Logger;
use crate::metrics::{compute_metrics, CostModel};
use crate::service::{create_service, FailureKind, RetrievalError, RetrievalResult, RetrievalService, RouteReply};
use crate::types::{AgentReasoning, Message, Routing};
use crate::{log_debug, log_info, log_warn};

/// Why a submission did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty or whitespace-only input
    Blank,
    /// Another query is in flight
    Busy,
}

/// What `submit_query` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An assistant turn with tools and metrics was appended
    Answered,
    /// An error turn was appended
    Failed(FailureKind),
    /// Nothing was appended
    Ignored(IgnoreReason),
}

/// The subset of [`CoffeeConfig`] the orchestrator acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    mode: ModeConfig,
    top_k: u32,
    verbose_tokens: u64,
    abbreviated_tokens: u64,
    chars_per_token: u32,
}

impl From<&CoffeeConfig> for Settings {
    fn from(config: &CoffeeConfig) -> Self {
        Self {
            mode: config.mode,
            top_k: config.top_k,
            verbose_tokens: config.verbose_tokens,
            abbreviated_tokens: config.abbreviated_tokens,
            chars_per_token: config.chars_per_token,
        }
    }
}

/// Drives one session against the router
///
/// `submit_query` never fails: every outcome, including router and transport
/// errors, ends up as a message in the session's transcript.
pub struct Orchestrator {
    session: Arc<Session>,
    service: Arc<dyn RetrievalService>,
    settings: Settings,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    pub fn new(
        session: Arc<Session>,
        service: Arc<dyn RetrievalService>,
        config: &CoffeeConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            session,
            service,
            settings: Settings::from(config),
            logger,
        }
    }

    /// Fresh session (with the configured greeting) and service for `config`
    pub fn from_config(config: &CoffeeConfig, logger: Arc<dyn Logger>) -> Self {
        let session = Arc::new(Session::with_greeting(config.greeting.as_deref(), logger.clone()));
        let service = create_service(config, logger.clone());
        Self::new(session, service, config, logger)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn mode(&self) -> ModeConfig {
        self.settings.mode
    }

    /// Fill the catalog cache; call once at startup
    ///
    /// Only the agent mode needs the catalog. A failure is logged and leaves
    /// the savings baseline at zero.
    pub async fn load_catalog(&self) -> CatalogLoad {
        if self.settings.mode != ModeConfig::Agent {
            log_debug!(self.logger, "[Orchestrator] {} mode does not use the catalog", self.settings.mode.as_str());
            return CatalogLoad::Skipped;
        }
        self.session.catalog().load(self.service.as_ref()).await
    }

    /// Send `text` to the router and record the exchange
    pub async fn submit_query(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Blank);
        }
        let Some(_busy) = self.session.busy().try_acquire() else {
            log_debug!(self.logger, "[Orchestrator] Rejected submission while busy");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        self.session.store().append(Message::user(text));
        log_debug!(self.logger, "[Orchestrator] Query: {}", text);

        match self.answer(text).await {
            Ok(message) => {
                log_info!(
                    self.logger,
                    "[Orchestrator] {} returned {} tools",
                    self.endpoint(),
                    message.tools().map_or(0, |t| t.len())
                );
                self.session.store().append(message);
                SubmitOutcome::Answered
            }
            Err(e) => {
                let kind = e.kind();
                log_warn!(self.logger, "[Orchestrator] {} failed ({}): {}", self.endpoint(), kind.as_str(), e);
                self.session.store().append(Message::error(format!("Error: {}", e)));
                SubmitOutcome::Failed(kind)
            }
        }
    }

    fn endpoint(&self) -> &'static str {
        match self.settings.mode {
            ModeConfig::Ranked => "/route",
            ModeConfig::Agent => "/agent-route",
        }
    }

    async fn answer(&self, query: &str) -> RetrievalResult<Message> {
        let reply = match self.settings.mode {
            ModeConfig::Ranked => RouteReply::Ranked(self.service.route(query, self.settings.top_k).await?),
            ModeConfig::Agent => RouteReply::Agent(self.service.agent_route(query).await?),
        };
        self.build_message(reply)
    }

    fn build_message(&self, reply: RouteReply) -> RetrievalResult<Message> {
        match reply {
            RouteReply::Ranked(response) => {
                let model = CostModel::Fixed {
                    verbose: self.settings.verbose_tokens,
                    abbreviated: self.settings.abbreviated_tokens,
                };
                let metrics = compute_metrics(&response.tools, &model);
                let text = found_text(response.tools.len());
                Message::visualization(text, response.tools, metrics, Routing::Ranked)
                    .ok_or_else(|| RetrievalError::empty("No tools found"))
            }
            RouteReply::Agent(response) => {
                let metrics = self.session.catalog().with_entries(|catalog| {
                    let model = CostModel::CatalogRelative {
                        catalog,
                        chars_per_token: self.settings.chars_per_token,
                    };
                    compute_metrics(&response.tools, &model)
                });
                let text = if response.explanation.trim().is_empty() {
                    found_text(response.tools.len())
                } else {
                    response.explanation
                };
                let routing = Routing::Agent(AgentReasoning {
                    reasoning: response.reasoning,
                    intent_summary: response.intent_summary,
                });
                Message::visualization(text, response.tools, metrics, routing)
                    .ok_or_else(|| RetrievalError::empty("No relevant tools found"))
            }
        }
    }
}

fn found_text(count: usize) -> String {
    format!(
        "I found {} relevant tools for your query. Here's the efficiency breakdown:",
        count
    )
}
