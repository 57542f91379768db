//! Per-agent world memory.
//!
//! Agents do not get global knowledge: what an agent "knows" about resource
//! locations is whatever it last saw, stamped with when it saw it.  Seek
//! behaviors head for a remembered location first and fall back to searching
//! when the memory is empty or proves wrong on arrival.

use gm_core::{GridPos, ResourceKind, Tick};

/// What one agent remembers about the world.
///
/// One fixed-size slot per [`ResourceKind`]; recording overwrites the slot
/// unconditionally, so each agent holds only the most recent sighting.
#[derive(Clone, Debug, Default)]
pub struct AgentMemory {
    resources: [Option<(GridPos, Tick)>; ResourceKind::COUNT],
}

impl AgentMemory {
    /// Record a sighting of `kind` at `pos`, replacing any earlier one.
    #[inline]
    pub fn record(&mut self, kind: ResourceKind, pos: GridPos, seen: Tick) {
        self.resources[kind.index()] = Some((pos, seen));
    }

    /// The most recent sighting of `kind`, if any.
    #[inline]
    pub fn recall(&self, kind: ResourceKind) -> Option<(GridPos, Tick)> {
        self.resources[kind.index()]
    }

    /// Drop the sighting for `kind` (the agent arrived and found nothing).
    #[inline]
    pub fn forget(&mut self, kind: ResourceKind) {
        self.resources[kind.index()] = None;
    }

    /// Drop everything (death wipes memory).
    pub fn clear(&mut self) {
        self.resources = Default::default();
    }
}
