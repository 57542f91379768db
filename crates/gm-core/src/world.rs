//! The read-only world boundary and the entity vocabulary behind it.
//!
//! The decision core never mutates world state.  During a decision pass it
//! reads a frozen snapshot of the previous tick's world through [`WorldView`];
//! applying the chosen actions (combat math, resource transfer, construction)
//! is the external executor's job.  Keeping the interface this narrow is what
//! makes per-agent decisions order-independent.

use crate::{EntityId, GridPos};

// ── Entity vocabulary ─────────────────────────────────────────────────────────

/// Kind of a harvestable resource.
///
/// The discriminant indexes per-resource agent memory arrays, so the order is
/// load-bearing: append new kinds, never reorder.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ResourceKind {
    Wood = 0,
    Stone = 1,
    Food = 2,
    Water = 3,
}

impl ResourceKind {
    /// Number of resource kinds; sizes per-kind memory arrays.
    pub const COUNT: usize = 4;

    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Food,
        ResourceKind::Water,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Kind of a placed structure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// Team home; spawn point and patrol anchor.
    Camp,
    /// Resource drop-off target for gatherers.
    Stockpile,
    /// Construction site awaiting build actions.
    Site,
    Wall,
}

/// What occupies a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Agent,
    Resource(ResourceKind),
    Building(BuildingKind),
    /// Impassable scenery with no interactions (boulders, cliffs).
    Obstacle,
}

/// Team tag.  Two entities are hostile iff their teams differ and neither is
/// [`Team::NEUTRAL`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub u8);

impl Team {
    pub const NEUTRAL: Team = Team(u8::MAX);

    /// `true` if `self` and `other` can attack each other.
    #[inline]
    pub fn hostile_to(self, other: Team) -> bool {
        self != other && self != Team::NEUTRAL && other != Team::NEUTRAL
    }
}

/// A snapshot of one entity as seen through the world view.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
    pub team: Team,
    /// Units of cargo currently carried (agents) or stored (buildings).
    pub cargo: u8,
}

// ── WorldView ─────────────────────────────────────────────────────────────────

/// Read-only access to world state during a decision pass.
///
/// Implementations must be stable for the duration of one tick's decisions:
/// the core caches results keyed by the current tick and assumes repeated
/// queries within a tick agree with each other.
pub trait WorldView {
    /// `true` if an agent may stand on `pos` this tick.
    fn passable(&self, pos: GridPos) -> bool;

    /// The entity occupying `pos`, if any.  Empty tiles return `None` — that
    /// is a normal result, not an error.
    fn entity_at(&self, pos: GridPos) -> Option<EntityRef>;

    /// All entities of `kind`, in unspecified but per-tick-stable order.
    ///
    /// Intended for cold paths (cache refills); hot proximity queries go
    /// through the spatial index instead.
    fn entities_of_kind(&self, kind: EntityKind) -> Vec<(EntityId, GridPos)>;
}
