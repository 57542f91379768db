//! Engine-level error type.
//!
//! Errors exist at construction time only.  Once a
//! [`DecisionEngine`][crate::DecisionEngine] is built, a decision pass cannot
//! fail: the worst outcome for any single agent is an idle action for that
//! tick.

use thiserror::Error;

use gm_core::CoreError;

/// Errors produced while assembling a [`DecisionEngine`][crate::DecisionEngine].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A per-agent input slice doesn't match the agent count.
    #[error("{what}: expected {expected} entries, got {got}")]
    AgentCountMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },
}

/// Shorthand result type for `gm-sim`.
pub type EngineResult<T> = Result<T, EngineError>;
