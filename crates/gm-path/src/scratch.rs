//! Generation-stamped reusable search arrays.
//!
//! # Why generations instead of clearing
//!
//! A search touches at most `node_budget` cells, but the backing arrays span
//! the whole map.  Zeroing them between searches would cost O(map) per agent
//! per tick — with a thousand agents that dwarfs the searches themselves.
//! Instead every cell carries a `last-touched` stamp: a cell's cached g-score,
//! predecessor and closed flag are trusted only when its stamp equals the
//! live generation counter.  Starting a new search increments the counter,
//! invalidating every prior entry in O(1) without writing a single cell.

use gm_core::GridPos;

/// Predecessor sentinel for untouched/root cells.
pub(crate) const NO_PARENT: u32 = u32::MAX;

/// Reusable per-cell working arrays for A*, valid for one map size.
///
/// One instance is shared by all agents' searches within a tick; it is a
/// single-writer structure, mutated only by the planner that owns it.
pub struct SearchScratch {
    width: i32,
    height: i32,
    generation: u32,
    /// Per-cell last-touched generation.
    stamp: Vec<u32>,
    /// Cost from the search start; trusted iff stamped current.
    g: Vec<u32>,
    /// Cell index of the predecessor on the best known path.
    parent: Vec<u32>,
    /// Closed-set membership; trusted iff stamped current.
    closed: Vec<bool>,
}

impl SearchScratch {
    /// Allocate scratch space for a `width × height` map.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            generation: 0,
            stamp: vec![0; n],
            g: vec![0; n],
            parent: vec![NO_PARENT; n],
            closed: vec![false; n],
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

    /// The live generation counter.  Entries stamped with any other value are
    /// logically absent.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start a new search: one counter increment invalidates all prior state.
    ///
    /// On the (astronomically rare) counter wrap the stamps are cleared once
    /// so stale entries can never alias the restarted counter.
    pub fn begin_search(&mut self) {
        if self.generation == u32::MAX {
            self.stamp.fill(0);
            self.generation = 0;
        }
        self.generation += 1;
    }

    /// Dense cell index for an in-bounds position, `None` outside the map.
    #[inline]
    pub fn index_of(&self, pos: GridPos) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as u32)
    }

    /// Position for a dense cell index.
    #[inline]
    pub fn pos_of(&self, idx: u32) -> GridPos {
        GridPos::new(idx as i32 % self.width, idx as i32 / self.width)
    }

    // ── Stamped accessors ─────────────────────────────────────────────────
    //
    // Reads treat unstamped/stale cells as absent; writes stamp the cell.

    #[inline]
    pub fn g_score(&self, idx: u32) -> u32 {
        let i = idx as usize;
        if self.stamp[i] == self.generation { self.g[i] } else { u32::MAX }
    }

    #[inline]
    pub fn set_g_score(&mut self, idx: u32, g: u32, parent: u32) {
        let i = idx as usize;
        if self.stamp[i] != self.generation {
            self.stamp[i] = self.generation;
            self.closed[i] = false;
        }
        self.g[i] = g;
        self.parent[i] = parent;
    }

    #[inline]
    pub fn parent_of(&self, idx: u32) -> Option<u32> {
        let i = idx as usize;
        if self.stamp[i] == self.generation && self.parent[i] != NO_PARENT {
            Some(self.parent[i])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_closed(&self, idx: u32) -> bool {
        let i = idx as usize;
        self.stamp[i] == self.generation && self.closed[i]
    }

    #[inline]
    pub fn close(&mut self, idx: u32) {
        let i = idx as usize;
        if self.stamp[i] != self.generation {
            // Closing an untouched cell stamps it with no recorded parent.
            self.stamp[i] = self.generation;
            self.g[i] = u32::MAX;
            self.parent[i] = NO_PARENT;
        }
        self.closed[i] = true;
    }
}
