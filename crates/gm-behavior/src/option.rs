//! Option records and the contexts their hooks run against.
//!
//! An option is plain data: a name, an interruptibility flag, and three boxed
//! hooks.  A role is nothing but an ordered slice of options — there is no
//! trait hierarchy to subclass, which is what lets roles be generated or
//! recombined at runtime.

use std::sync::Arc;

use gm_agent::AgentMemory;
use gm_core::{AgentId, AgentRng, GridPos, NavConfig, Team, Tick, WorldView};
use gm_path::{NavState, Navigator};
use gm_spatial::SpatialIndex;

use crate::action::Action;
use crate::cache::RoleCaches;

// ── Contexts ──────────────────────────────────────────────────────────────────

/// Read-only view of one agent's situation, rebuilt per decision.
///
/// Everything here refers to the frozen pre-tick snapshot: hooks for agent N
/// see the same world as hooks for agent N+1, regardless of decision order.
pub struct OptionCtx<'a> {
    pub agent: AgentId,
    pub tick: Tick,
    pub pos: GridPos,
    pub team: Team,
    /// Cargo the agent carries per the snapshot (0 when empty-handed).
    pub cargo: u8,
    pub world: &'a dyn WorldView,
    pub index: &'a SpatialIndex,
    pub config: &'a NavConfig,
}

/// Mutable per-agent state a hook may update while acting.
///
/// `can_start` and `should_terminate` receive this read-only: predicates must
/// not leave observable traces, so rescanning the option list from scratch
/// always reproduces the incremental scan's choice.
pub struct AgentScratch<'a> {
    pub rng: &'a mut AgentRng,
    pub nav: &'a mut NavState,
    pub memory: &'a mut AgentMemory,
    pub navigator: &'a mut Navigator,
    pub caches: &'a mut RoleCaches,
}

// ── OptionDef ─────────────────────────────────────────────────────────────────

/// Eligibility predicate.  Must be a pure function of the context.
pub type CanStartFn = Box<dyn Fn(&OptionCtx<'_>, &AgentScratch<'_>) -> bool + Send + Sync>;

/// Produce this tick's action.  May navigate, roll dice, and update memory.
/// Must return [`Action::idle`] when the target vanished since `can_start` —
/// never a guess at an invalid action.
pub type ActFn = Box<dyn Fn(&OptionCtx<'_>, &mut AgentScratch<'_>) -> Action + Send + Sync>;

/// `true` when the option has run its course and the slot should clear.
pub type ShouldTerminateFn = Box<dyn Fn(&OptionCtx<'_>, &AgentScratch<'_>) -> bool + Send + Sync>;

/// One behavior in a role's priority-ordered list.
pub struct OptionDef {
    /// Diagnostic name, surfaced through observers.
    pub name: &'static str,
    /// Whether a higher-priority option may preempt this one mid-run.
    pub interruptible: bool,
    pub can_start: CanStartFn,
    pub act: ActFn,
    pub should_terminate: ShouldTerminateFn,
}

impl OptionDef {
    /// Convenience constructor keeping role libraries readable.
    pub fn new(
        name: &'static str,
        interruptible: bool,
        can_start: impl Fn(&OptionCtx<'_>, &AgentScratch<'_>) -> bool + Send + Sync + 'static,
        act: impl Fn(&OptionCtx<'_>, &mut AgentScratch<'_>) -> Action + Send + Sync + 'static,
        should_terminate: impl Fn(&OptionCtx<'_>, &AgentScratch<'_>) -> bool + Send + Sync + 'static,
    ) -> OptionDef {
        OptionDef {
            name,
            interruptible,
            can_start: Box::new(can_start),
            act: Box::new(act),
            should_terminate: Box::new(should_terminate),
        }
    }
}

impl std::fmt::Debug for OptionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDef")
            .field("name", &self.name)
            .field("interruptible", &self.interruptible)
            .finish_non_exhaustive()
    }
}

/// A role: a shared, priority-ordered option list (index 0 is highest).
pub type Role = Arc<[OptionDef]>;
