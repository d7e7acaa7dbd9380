//! Node.js bindings for COFFEE via napi-rs

#![deny(clippy::all)]

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Arc;

use coffee_core::config::{
    CoffeeConfig, ConfigLevel as CoreConfigLevel, ConfigProvider as CoreConfigProvider,
    FileConfigProvider as CoreFileConfigProvider, ModeConfig,
};
use coffee_core::logging::{FileLogger, Logger};
use coffee_core::types::{
    Message as CoreMessage, MessageRole as CoreMessageRole, TokenMetrics as CoreTokenMetrics,
    ToolResult as CoreToolResult,
};
use coffee_core::metrics::fixed_metrics;
use coffee_core::{CatalogLoad, IgnoreReason, Orchestrator, SubmitOutcome};

// ============================================================================
// Options
// ============================================================================

/// Session settings; unset fields fall back to the built-in defaults
#[napi(object)]
pub struct SessionOptions {
    pub base_url: Option<String>,
    /// "ranked" or "agent"
    pub mode: Option<String>,
    pub top_k: Option<u32>,
    /// Empty string disables the greeting
    pub greeting: Option<String>,
}

impl From<&CoffeeConfig> for SessionOptions {
    fn from(config: &CoffeeConfig) -> Self {
        Self {
            base_url: Some(config.base_url.clone()),
            mode: Some(config.mode.as_str().to_string()),
            top_k: Some(config.top_k),
            greeting: Some(config.greeting.clone().unwrap_or_default()),
        }
    }
}

fn to_config(options: Option<SessionOptions>) -> Result<CoffeeConfig> {
    let mut config = CoffeeConfig::default();
    let Some(options) = options else {
        return Ok(config);
    };
    if let Some(base_url) = options.base_url {
        config.base_url = base_url;
    }
    if let Some(mode) = options.mode {
        config.mode = mode
            .parse::<ModeConfig>()
            .map_err(|e| Error::from_reason(e.to_string()))?;
    }
    if let Some(top_k) = options.top_k {
        config.top_k = top_k;
    }
    if let Some(greeting) = options.greeting {
        config.greeting = Some(greeting).filter(|g| !g.trim().is_empty());
    }
    config.validate().map_err(|e| Error::from_reason(e.to_string()))?;
    Ok(config)
}

/// Read options from a YAML file (user config when `path` is omitted) and
/// apply `COFFEE_*` environment overrides
#[napi]
pub async fn load_session_options(path: Option<String>) -> Result<SessionOptions> {
    let provider = match path {
        Some(path) => CoreFileConfigProvider::new(path, CoreConfigLevel::User),
        None => CoreFileConfigProvider::user(),
    };
    let config = provider
        .load()
        .await
        .and_then(CoffeeConfig::apply_env_overrides)
        .map_err(|e| Error::from_reason(e.to_string()))?;
    coffee_core::logging::info(
        "napi",
        &format!("Loaded session options from {}", provider.path().display()),
    );
    Ok(SessionOptions::from(&config))
}

// ============================================================================
// Message Types
// ============================================================================

#[napi(string_enum)]
pub enum MessageRole {
    User,
    Assistant,
}

impl From<CoreMessageRole> for MessageRole {
    fn from(role: CoreMessageRole) -> Self {
        match role {
            CoreMessageRole::User => MessageRole::User,
            CoreMessageRole::Assistant => MessageRole::Assistant,
        }
    }
}

#[napi(object)]
pub struct ToolResult {
    pub id: String,
    pub name: String,
    pub score: f64,
    /// Score as a whole percentage for display
    pub score_percent: u32,
}

impl From<&CoreToolResult> for ToolResult {
    fn from(tool: &CoreToolResult) -> Self {
        Self {
            id: tool.id.to_string(),
            name: tool.name.clone(),
            score: tool.score,
            score_percent: tool.score_percent() as u32,
        }
    }
}

#[napi(object)]
pub struct TokenMetrics {
    pub cost_without_offload: i64,
    pub cost_with_offload: i64,
    pub savings: i64,
    /// One decimal place, e.g. "85.7"
    pub savings_percent: String,
    pub offload_ratio: f64,
}

impl From<&CoreTokenMetrics> for TokenMetrics {
    fn from(metrics: &CoreTokenMetrics) -> Self {
        Self {
            cost_without_offload: to_js_int(metrics.cost_without_offload),
            cost_with_offload: to_js_int(metrics.cost_with_offload),
            savings: to_js_int(metrics.savings),
            savings_percent: metrics.savings_percent_label(),
            offload_ratio: metrics.offload_ratio(),
        }
    }
}

/// Saturating u64 -> i64 for JS numbers
fn to_js_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[napi(object)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    pub is_error: bool,
    pub has_visualization: bool,
    pub tools: Option<Vec<ToolResult>>,
    pub metrics: Option<TokenMetrics>,
    pub reasoning: Option<String>,
    pub intent_summary: Option<String>,
}

impl From<&CoreMessage> for ChatMessage {
    fn from(message: &CoreMessage) -> Self {
        Self {
            role: message.role().into(),
            text: message.text().to_string(),
            is_error: message.is_error(),
            has_visualization: message.has_visualization(),
            tools: message.tools().map(|tools| tools.iter().map(ToolResult::from).collect()),
            metrics: message.metrics().map(TokenMetrics::from),
            reasoning: message.reasoning().map(str::to_string),
            intent_summary: message.intent_summary().map(str::to_string),
        }
    }
}

/// Savings for `count` tools under the default fixed cost model
#[napi]
pub fn compute_fixed_metrics(count: u32) -> TokenMetrics {
    let config = CoffeeConfig::default();
    let metrics = fixed_metrics(count as usize, config.verbose_tokens, config.abbreviated_tokens);
    TokenMetrics::from(&metrics)
}

// ============================================================================
// CoffeeSession
// ============================================================================

#[napi(string_enum)]
pub enum SubmitStatus {
    Answered,
    Failed,
    IgnoredBlank,
    IgnoredBusy,
}

impl From<SubmitOutcome> for SubmitStatus {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Answered => SubmitStatus::Answered,
            SubmitOutcome::Failed(_) => SubmitStatus::Failed,
            SubmitOutcome::Ignored(IgnoreReason::Blank) => SubmitStatus::IgnoredBlank,
            SubmitOutcome::Ignored(IgnoreReason::Busy) => SubmitStatus::IgnoredBusy,
        }
    }
}

/// One conversation with the COFFEE router
#[napi]
pub struct CoffeeSession {
    inner: Arc<Orchestrator>,
}

#[napi]
impl CoffeeSession {
    #[napi(constructor)]
    pub fn new(options: Option<SessionOptions>) -> Result<Self> {
        let config = to_config(options)?;
        let logger: Arc<dyn Logger> = Arc::new(FileLogger::new("session"));
        coffee_core::logging::info(
            "napi",
            &format!("CoffeeSession: mode={}, baseUrl={}", config.mode.as_str(), config.base_url),
        );
        Ok(Self {
            inner: Arc::new(Orchestrator::from_config(&config, logger)),
        })
    }

    #[napi(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().as_str().to_string()
    }

    #[napi(getter)]
    pub fn is_busy(&self) -> bool {
        self.inner.session().is_busy()
    }

    /// Fetch the tool catalog; resolves to the number of tools cached
    ///
    /// Never rejects: a failed fetch resolves to 0.
    #[napi]
    pub async fn load_catalog(&self) -> u32 {
        match self.inner.load_catalog().await {
            CatalogLoad::Loaded(count) => count as u32,
            CatalogLoad::AlreadyAttempted => self.inner.session().catalog().len() as u32,
            CatalogLoad::Failed | CatalogLoad::Skipped => 0,
        }
    }

    /// Send a query; the reply (or error) is appended to `messages()`
    #[napi]
    pub async fn submit_query(&self, text: String) -> SubmitStatus {
        self.inner.submit_query(&text).await.into()
    }

    #[napi]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner
            .session()
            .messages()
            .iter()
            .map(ChatMessage::from)
            .collect()
    }
}
