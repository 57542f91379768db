//! `SpatialIndex` membership bookkeeping.

use rustc_hash::FxHashMap;

use gm_core::{CellCoord, EntityId, GridPos};

/// Where one entity currently sits inside the index.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EntityEntry {
    pub pos: GridPos,
    pub cell: CellCoord,
    /// Index into the cell's bucket; maintained through swap-removal.
    pub slot: usize,
}

/// Cell-bucketed entity index for O(1)-amortized proximity queries.
///
/// # Invariant
///
/// Every tracked entity is registered in exactly one cell, and that cell is
/// always the one implied by the entity's current position.  Any position
/// mutation must go through [`update`](SpatialIndex::update) — writing
/// positions anywhere else silently breaks every query.
pub struct SpatialIndex {
    cell_size: i32,
    pub(crate) buckets: FxHashMap<CellCoord, Vec<EntityId>>,
    pub(crate) entries: FxHashMap<EntityId, EntityEntry>,
    /// Precomputed cell offsets sorted by ring distance; `ring_starts[r]` is
    /// where ring `r` begins.  Built once at construction (see `query`).
    pub(crate) offsets: Vec<(i32, i32)>,
    pub(crate) ring_starts: Vec<usize>,
}

impl SpatialIndex {
    /// Create an empty index with the given cell side length in tiles.
    pub fn new(cell_size: i32) -> Self {
        debug_assert!(cell_size > 0);
        let (offsets, ring_starts) = crate::query::build_offset_table();
        Self {
            cell_size,
            buckets: FxHashMap::default(),
            entries: FxHashMap::default(),
            offsets,
            ring_starts,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current registered position of `entity`, if tracked.
    #[inline]
    pub fn position(&self, entity: EntityId) -> Option<GridPos> {
        self.entries.get(&entity).map(|e| e.pos)
    }

    /// Register `entity` at `pos`.
    ///
    /// Re-inserting a tracked entity is treated as [`update`](Self::update).
    pub fn insert(&mut self, entity: EntityId, pos: GridPos) {
        if self.entries.contains_key(&entity) {
            self.update(entity, pos);
            return;
        }
        let cell = pos.cell(self.cell_size);
        let bucket = self.buckets.entry(cell).or_default();
        bucket.push(entity);
        let slot = bucket.len() - 1;
        self.entries.insert(entity, EntityEntry { pos, cell, slot });
    }

    /// Unregister `entity`.  Unknown entities are a no-op.
    pub fn remove(&mut self, entity: EntityId) {
        let Some(entry) = self.entries.remove(&entity) else {
            return;
        };
        self.evict_from_bucket(entry);
    }

    /// Move `entity` to `new_pos`, keeping cell membership coherent.
    ///
    /// When the new position maps to the same cell only the stored position
    /// changes; otherwise the entity is swap-removed from its old bucket and
    /// pushed onto the new one.  Untracked entities are inserted.
    pub fn update(&mut self, entity: EntityId, new_pos: GridPos) {
        let Some(entry) = self.entries.get_mut(&entity) else {
            self.insert(entity, new_pos);
            return;
        };
        let new_cell = new_pos.cell(self.cell_size);
        if new_cell == entry.cell {
            entry.pos = new_pos;
            return;
        }
        let old = *entry;
        self.evict_from_bucket(old);

        let bucket = self.buckets.entry(new_cell).or_default();
        bucket.push(entity);
        let slot = bucket.len() - 1;
        self.entries
            .insert(entity, EntityEntry { pos: new_pos, cell: new_cell, slot });
    }

    /// Entities registered in one cell.  Empty slice for untouched cells.
    pub fn cell_entities(&self, cell: CellCoord) -> &[EntityId] {
        self.buckets.get(&cell).map_or(&[], Vec::as_slice)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Swap-with-last-and-pop removal from a bucket, fixing up the slot of
    /// the entity that got swapped into the vacated position.
    fn evict_from_bucket(&mut self, entry: EntityEntry) {
        let bucket = self
            .buckets
            .get_mut(&entry.cell)
            .expect("entry cell always has a bucket");
        bucket.swap_remove(entry.slot);
        if let Some(&moved) = bucket.get(entry.slot) {
            if let Some(moved_entry) = self.entries.get_mut(&moved) {
                moved_entry.slot = entry.slot;
            }
        }
        if bucket.is_empty() {
            self.buckets.remove(&entry.cell);
        }
    }
}
