//! Framework error type.
//!
//! Errors here cover construction and configuration only.  Inside a decision
//! pass nothing is an error: a query with no match returns an empty result, an
//! unreachable goal yields a best-effort (possibly empty) path, and the worst
//! case for any single agent is an idle action for that tick.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `gm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gm-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
