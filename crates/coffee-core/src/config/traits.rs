//! Configuration model and provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Production router
pub const DEFAULT_BASE_URL: &str = "https://coffee-router-production.up.railway.app";

/// Opening assistant turn of every session
pub const DEFAULT_GREETING: &str = "Hey there! I'm your AI agent powered by COFFEE. Ask me anything about tools you need, and I'll show you how much we save on tokens.";

/// Which router endpoint a session talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    /// `POST /route`, fixed per-tool costs
    #[default]
    Ranked,
    /// `POST /agent-route`, costs sized from the tool catalog
    Agent,
}

impl ModeConfig {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeConfig::Ranked => "ranked",
            ModeConfig::Agent => "agent",
        }
    }
}

impl std::str::FromStr for ModeConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ranked" | "route" => Ok(ModeConfig::Ranked),
            "agent" | "agent-route" => Ok(ModeConfig::Agent),
            other => Err(ConfigError::Invalid(format!("unknown mode '{}'", other))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoffeeConfig {
    /// Router base URL, without trailing slash
    pub base_url: String,
    pub mode: ModeConfig,
    /// Number of tools requested from `/route`
    pub top_k: u32,
    /// Tokens per tool when the full definition is sent
    pub verbose_tokens: u64,
    /// Tokens per tool when only the terse descriptor is sent
    pub abbreviated_tokens: u64,
    /// Characters per token when sizing descriptions
    pub chars_per_token: u32,
    /// Seed message; `None` starts with an empty transcript
    pub greeting: Option<String>,
}

impl Default for CoffeeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: ModeConfig::Ranked,
            top_k: 5,
            verbose_tokens: 350,
            abbreviated_tokens: 50,
            chars_per_token: 4,
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

impl CoffeeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_mode(mut self, mode: ModeConfig) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be at least 1".to_string()));
        }
        if self.chars_per_token == 0 {
            return Err(ConfigError::Invalid("chars_per_token must be at least 1".to_string()));
        }
        if self.abbreviated_tokens > self.verbose_tokens {
            return Err(ConfigError::Invalid(format!(
                "abbreviated_tokens ({}) exceeds verbose_tokens ({})",
                self.abbreviated_tokens, self.verbose_tokens
            )));
        }
        Ok(())
    }

    /// Apply `COFFEE_BASE_URL`, `COFFEE_MODE` and `COFFEE_TOP_K`
    pub fn apply_env_overrides(self) -> ConfigResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production)
    ///
    /// The overridden config is re-validated.
    pub fn apply_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COFFEE_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(mode) = lookup("COFFEE_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(top_k) = lookup("COFFEE_TOP_K") {
            self.top_k = top_k
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("COFFEE_TOP_K is not a number: {}", top_k)))?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Source of a [`CoffeeConfig`]
///
/// Implementations:
/// - `MemoryConfigProvider`: in-memory for tests and embedding
/// - `FileConfigProvider`: YAML file (~/.config/coffee/config.yaml)
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Load the configuration; missing sources yield defaults
    async fn load(&self) -> ConfigResult<CoffeeConfig>;

    /// Persist the configuration
    async fn save(&self, config: &CoffeeConfig) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
