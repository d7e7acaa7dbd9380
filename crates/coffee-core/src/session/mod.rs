//! One conversation with the router
//!
//! [`Session`] holds the state (transcript, busy flag, catalog cache) and
//! [`Orchestrator`] drives it: it validates input, calls the router, computes
//! metrics and appends exactly one assistant turn per accepted query.

mod busy;
mod orchestrator;
mod state;

pub use busy::{BusyFlag, BusyGuard};
pub use orchestrator::{IgnoreReason, Orchestrator, SubmitOutcome};
pub use state::Session;
