//! COFFEE Core
//!
//! Runtime-agnostic client for the COFFEE tool router.
//! This crate provides the conversation logic that any front end can drive
//! (Node.js via napi-rs, a terminal UI, tests, etc.)
//!
//! ## Query flow
//!
//! An [`Orchestrator`] owns one [`Session`]. Each submitted query is sent to
//! the router, the selected tools are scored with a token-savings estimate,
//! and a single assistant turn is appended to the transcript:
//!
//! ```rust,ignore
//! use coffee_core::{CoffeeConfig, Orchestrator, ConsoleLogger};
//!
//! let config = CoffeeConfig::default().apply_env_overrides()?;
//! let orchestrator = Orchestrator::from_config(&config, Arc::new(ConsoleLogger::new()));
//! orchestrator.load_catalog().await;
//!
//! orchestrator.submit_query("search for code repositories").await;
//! for message in orchestrator.session().messages() {
//!     println!("{}: {}", message.role(), message.text());
//! }
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod service;
pub mod metrics;
pub mod conversation;
pub mod catalog;
pub mod session;

// Re-export commonly used types
pub use types::{
    AgentReasoning, Message, MessageKind, MessageRole, Routing, Visualization,
    TokenMetrics, ToolCatalogEntry, ToolId, ToolResult,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, MemoryLogger, FileLogger};

pub use config::{CoffeeConfig, ConfigProvider, FileConfigProvider, MemoryConfigProvider, ModeConfig};

pub use service::{
    create_service, HttpRetrievalService, MockRetrievalService, RetrievalError, RetrievalService,
    FailureKind,
};

pub use metrics::{compute_metrics, fixed_metrics, CostModel};

pub use conversation::{ConversationStore, SessionEvent};

pub use catalog::{CatalogLoad, ToolCatalog};

pub use session::{IgnoreReason, Orchestrator, Session, SubmitOutcome};
