//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! A decision pass walks agents in ascending ID order and needs `&mut` access
//! to the deciding agent's RNG and navigation state while reading other
//! agents' positions.  Keeping the RNGs in their own struct lets the engine
//! split the borrow (`&mut AgentRngs` + `&mut AgentStore` fields) without
//! fighting the borrow checker inside one struct.

use gm_core::{AgentId, AgentRng, Direction, GridPos, NavConfig, RoleId, Team};
use gm_path::NavState;

use crate::memory::AgentMemory;

/// Sentinel for "no option is active" in [`AgentStore::active_option`].
pub const NO_OPTION: u16 = u16::MAX;

/// Lifecycle phase of one agent slot.
///
/// Slots are allocated once at build time and recycled: a `Terminated` agent
/// keeps its slot (and ID) until a respawn reuses it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum AgentPhase {
    /// Allocated but never spawned; the engine skips it entirely.
    #[default]
    Uninitialized,
    /// Alive and deciding every tick.
    Ready,
    /// Dead; emits idle actions until respawned.
    Terminated,
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] so the
/// engine can hold `&mut` RNG and `&` store simultaneously.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.pos[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Positions here are the store's view only — the engine mirrors every write
/// into the spatial index, which is why mutation goes through the lifecycle
/// methods rather than raw field writes.
pub struct AgentStore {
    /// Number of agent slots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Tile the agent stands on.  Meaningless unless `phase` is `Ready`.
    pub pos: Vec<GridPos>,

    /// Direction the agent faces (set by orient actions, read by executors).
    pub facing: Vec<Direction>,

    /// Team tag; fixed at spawn.
    pub team: Vec<Team>,

    /// Assigned role.  `RoleId::INVALID` until spawned.
    pub role: Vec<RoleId>,

    /// Lifecycle phase of each slot.
    pub phase: Vec<AgentPhase>,

    /// Index of the running option within the role's option list, or
    /// [`NO_OPTION`].
    pub active_option: Vec<u16>,

    /// Consecutive ticks the active option has been running.
    pub option_ticks: Vec<u32>,

    /// Per-agent navigation state (cached path, stuck window, blocked memory).
    pub nav: Vec<NavState>,

    /// Per-agent world memory (last-seen resource locations).
    pub memory: Vec<AgentMemory>,
}

impl AgentStore {
    pub(crate) fn new(count: usize, config: &NavConfig) -> Self {
        Self {
            count,
            pos: vec![GridPos::default(); count],
            facing: vec![Direction::North; count],
            team: vec![Team::NEUTRAL; count],
            role: vec![RoleId::INVALID; count],
            phase: vec![AgentPhase::Uninitialized; count],
            active_option: vec![NO_OPTION; count],
            option_ticks: vec![0; count],
            nav: vec![NavState::new(config); count],
            memory: vec![AgentMemory::default(); count],
        }
    }

    /// `true` if there are no agent slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// `true` if the slot holds a live, deciding agent.
    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.phase[agent.index()] == AgentPhase::Ready
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────
    //
    // These reset behavioral state; the engine wraps them to keep the
    // spatial index in step.

    /// Bring an `Uninitialized` or `Terminated` slot to life.
    pub fn spawn(&mut self, agent: AgentId, pos: GridPos, role: RoleId, team: Team) {
        let i = agent.index();
        self.pos[i] = pos;
        self.facing[i] = Direction::North;
        self.team[i] = team;
        self.role[i] = role;
        self.phase[i] = AgentPhase::Ready;
        self.reset_behavior(agent);
    }

    /// Mark an agent dead.  The slot keeps its role and team for a later
    /// respawn; everything behavioral is wiped.
    pub fn kill(&mut self, agent: AgentId) {
        let i = agent.index();
        self.phase[i] = AgentPhase::Terminated;
        self.reset_behavior(agent);
    }

    /// Revive a `Terminated` agent at `pos` with its existing role and team.
    pub fn respawn(&mut self, agent: AgentId, pos: GridPos) {
        let i = agent.index();
        self.pos[i] = pos;
        self.facing[i] = Direction::North;
        self.phase[i] = AgentPhase::Ready;
        self.reset_behavior(agent);
    }

    /// Clear option, navigation and memory state for one slot.
    fn reset_behavior(&mut self, agent: AgentId) {
        let i = agent.index();
        self.active_option[i] = NO_OPTION;
        self.option_ticks[i] = 0;
        self.nav[i].reset();
        self.memory[i].clear();
    }
}
