//! Token-savings metrics
//!
//! Two cost models: fixed per-tool constants for the ranked endpoint, and
//! description-length estimates against the full catalog for the agent
//! endpoint.

mod calculator;

pub use calculator::{compute_metrics, estimate_tokens, fixed_metrics, CostModel};
