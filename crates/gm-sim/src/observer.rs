//! Observer hooks for instrumenting decision passes.
//!
//! The engine itself emits nothing; anything an application wants to see
//! (progress lines, action histograms, metrics export) hangs off this trait.
//! All methods default to no-ops so implementors override only what they use.

use gm_behavior::EncodedAction;
use gm_core::{AgentId, Tick};

/// Callbacks invoked during [`decide_tick_with`][crate::DecisionEngine::decide_tick_with].
pub trait DecisionObserver {
    /// A decision pass is starting.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// One live agent's action was chosen.  Called in ascending `AgentId`
    /// order; dead and uninitialized slots are skipped.
    fn on_agent_decided(&mut self, _tick: Tick, _agent: AgentId, _action: EncodedAction) {}

    /// The pass finished.  `decided` is the number of live agents that ran.
    fn on_tick_end(&mut self, _tick: Tick, _decided: usize) {}
}

/// Observer that does nothing, for callers that don't need callbacks.
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}
