//! Range and nearest queries over the cell grid.
//!
//! Both queries work in rings of cells around the query center.  For a ring
//! of cell-Chebyshev radius `r`, any position inside any of its cells is at
//! least `(r - 1) * cell_size + 1` tiles away from the center (the center can
//! sit anywhere within its own cell).  That lower bound drives both the
//! range query's early exit and the nearest query's termination proof.

use gm_core::{CellCoord, EntityId, GridPos};

use crate::SpatialIndex;

/// Rings precomputed into the sorted offset table.  Covers query radii up to
/// `MAX_RING * cell_size` tiles; larger queries fall back to enumerating ring
/// perimeters on the fly.
const MAX_RING: i32 = 16;

/// Build the distance-sorted cell offset table shared by all range queries.
///
/// Offsets are grouped by ring (Chebyshev distance in cells) and ordered
/// deterministically within each ring.
pub(crate) fn build_offset_table() -> (Vec<(i32, i32)>, Vec<usize>) {
    let mut offsets = Vec::new();
    let mut ring_starts = Vec::with_capacity(MAX_RING as usize + 1);
    for r in 0..=MAX_RING {
        ring_starts.push(offsets.len());
        push_ring_offsets(r, &mut |dx, dy| offsets.push((dx, dy)));
    }
    (offsets, ring_starts)
}

/// Visit every `(dx, dy)` with `max(|dx|, |dy|) == r`, in a fixed order.
fn push_ring_offsets(r: i32, visit: &mut impl FnMut(i32, i32)) {
    if r == 0 {
        visit(0, 0);
        return;
    }
    for dx in -r..=r {
        visit(dx, -r);
        visit(dx, r);
    }
    for dy in (-r + 1)..r {
        visit(-r, dy);
        visit(r, dy);
    }
}

/// Minimum tile distance from a center to any position in a cell on ring `r`.
#[inline]
fn ring_min_dist(r: i32, cell_size: i32) -> i32 {
    if r == 0 { 0 } else { (r - 1) * cell_size + 1 }
}

impl SpatialIndex {
    /// All entities within Chebyshev distance `radius` of `center` that pass
    /// `filter`, with their positions.
    ///
    /// Visits only cells overlapping the radius, nearest rings first, and
    /// stops as soon as a ring provably lies beyond it.  Returns an empty
    /// vec when nothing matches — never an error.
    pub fn query_range(
        &self,
        center: GridPos,
        radius: i32,
        mut filter: impl FnMut(EntityId, GridPos) -> bool,
    ) -> Vec<(EntityId, GridPos)> {
        let mut out = Vec::new();
        if radius < 0 || self.entries.is_empty() {
            return out;
        }
        let c0 = center.cell(self.cell_size());

        let mut r = 0;
        while ring_min_dist(r, self.cell_size()) <= radius {
            self.for_each_ring_cell(c0, r, |index, cell| {
                for &entity in index.cell_entities(cell) {
                    let pos = index.entries[&entity].pos;
                    if center.chebyshev(pos) <= radius && filter(entity, pos) {
                        out.push((entity, pos));
                    }
                }
            });
            r += 1;
        }
        out
    }

    /// The closest entity to `center` passing `filter` within `max_radius`
    /// tiles, or `None`.
    ///
    /// Expands ring by ring and terminates once the best candidate found is
    /// provably closer than anything an unvisited ring could contain.  Ties
    /// break on smaller distance first, then smaller `EntityId`, so results
    /// are deterministic regardless of bucket order.
    pub fn nearest(
        &self,
        center: GridPos,
        max_radius: i32,
        mut filter: impl FnMut(EntityId, GridPos) -> bool,
    ) -> Option<(EntityId, GridPos)> {
        if max_radius < 0 || self.entries.is_empty() {
            return None;
        }
        let c0 = center.cell(self.cell_size());
        let mut best: Option<(i32, EntityId, GridPos)> = None;

        let mut r = 0;
        loop {
            let ring_floor = ring_min_dist(r, self.cell_size());
            if ring_floor > max_radius {
                break;
            }
            if let Some((best_dist, _, _)) = best {
                // No cell on this or any further ring can beat the champion.
                if ring_floor > best_dist {
                    break;
                }
            }
            self.for_each_ring_cell(c0, r, |index, cell| {
                for &entity in index.cell_entities(cell) {
                    let pos = index.entries[&entity].pos;
                    let dist = center.chebyshev(pos);
                    if dist > max_radius || !filter(entity, pos) {
                        continue;
                    }
                    let better = match best {
                        None => true,
                        Some((bd, be, _)) => dist < bd || (dist == bd && entity < be),
                    };
                    if better {
                        best = Some((dist, entity, pos));
                    }
                }
            });
            r += 1;
        }
        best.map(|(_, entity, pos)| (entity, pos))
    }

    /// Count of entities within `radius` passing `filter` — a range query
    /// that skips collecting positions.
    pub fn count_in_range(
        &self,
        center: GridPos,
        radius: i32,
        mut filter: impl FnMut(EntityId, GridPos) -> bool,
    ) -> usize {
        let mut n = 0;
        if radius < 0 {
            return 0;
        }
        let c0 = center.cell(self.cell_size());
        let mut r = 0;
        while ring_min_dist(r, self.cell_size()) <= radius {
            self.for_each_ring_cell(c0, r, |index, cell| {
                for &entity in index.cell_entities(cell) {
                    let pos = index.entries[&entity].pos;
                    if center.chebyshev(pos) <= radius && filter(entity, pos) {
                        n += 1;
                    }
                }
            });
            r += 1;
        }
        n
    }

    // ── Ring traversal ────────────────────────────────────────────────────

    /// Apply `f` to every cell on ring `r` around `c0`, using the precomputed
    /// offset table for the common rings and perimeter enumeration beyond it.
    fn for_each_ring_cell(&self, c0: CellCoord, r: i32, mut f: impl FnMut(&Self, CellCoord)) {
        if r <= MAX_RING {
            let start = self.ring_starts[r as usize];
            let end = self
                .ring_starts
                .get(r as usize + 1)
                .copied()
                .unwrap_or(self.offsets.len());
            for &(dx, dy) in &self.offsets[start..end] {
                f(self, CellCoord { cx: c0.cx + dx, cy: c0.cy + dy });
            }
        } else {
            push_ring_offsets(r, &mut |dx, dy| {
                f(self, CellCoord { cx: c0.cx + dx, cy: c0.cy + dy });
            });
        }
    }
}
