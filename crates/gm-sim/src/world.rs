//! `GridWorld` — an owned, mutable world for demos and integration tests.
//!
//! Real applications implement [`WorldView`] over their own state; this is
//! the batteries-included version: a bounded rectangle, a wall set, and one
//! entity per tile.  Mutation methods exist for the executor side of the
//! loop — during a decision pass only the `WorldView` surface is touched.

use rustc_hash::{FxHashMap, FxHashSet};

use gm_core::{EntityId, EntityKind, EntityRef, GridPos, WorldView};

/// A rectangular tile map with walls and at most one entity per tile.
///
/// A tile is passable when it is in bounds, not a wall, and empty.  Entities
/// (agents included) therefore block movement through their tile.
pub struct GridWorld {
    width: i32,
    height: i32,
    walls: FxHashSet<GridPos>,
    entities: FxHashMap<GridPos, EntityRef>,
}

impl GridWorld {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: FxHashSet::default(),
            entities: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn add_wall(&mut self, pos: GridPos) {
        self.walls.insert(pos);
    }

    pub fn remove_wall(&mut self, pos: GridPos) {
        self.walls.remove(&pos);
    }

    /// Put `entity` on `pos`, replacing whatever was there.
    pub fn place(&mut self, pos: GridPos, entity: EntityRef) {
        self.entities.insert(pos, entity);
    }

    /// Take the entity off `pos`, if any.
    pub fn remove_at(&mut self, pos: GridPos) -> Option<EntityRef> {
        self.entities.remove(&pos)
    }

    /// Mutable access to the entity on `pos` (cargo updates and the like).
    pub fn entity_at_mut(&mut self, pos: GridPos) -> Option<&mut EntityRef> {
        self.entities.get_mut(&pos)
    }

    /// Relocate the entity on `from` to `to`.  Fails (returning `false`,
    /// moving nothing) when `from` is empty or `to` is not free.
    pub fn move_entity(&mut self, from: GridPos, to: GridPos) -> bool {
        if !self.passable(to) {
            return false;
        }
        match self.entities.remove(&from) {
            Some(entity) => {
                self.entities.insert(to, entity);
                true
            }
            None => false,
        }
    }
}

impl WorldView for GridWorld {
    fn passable(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.walls.contains(&pos) && !self.entities.contains_key(&pos)
    }

    fn entity_at(&self, pos: GridPos) -> Option<EntityRef> {
        self.entities.get(&pos).copied()
    }

    fn entities_of_kind(&self, kind: EntityKind) -> Vec<(EntityId, GridPos)> {
        let mut found: Vec<(EntityId, GridPos)> = self
            .entities
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(&pos, e)| (e.id, pos))
            .collect();
        // Hash-map iteration order is not per-tick stable; sorting makes it so.
        found.sort_unstable();
        found
    }
}
