//! Bounded A* over a passability oracle.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gm_core::{GridPos, NavConfig};

use crate::scratch::{NO_PARENT, SearchScratch};

/// Best-effort waypoint planner with a hard node-expansion cap.
///
/// The planner owns one [`SearchScratch`] and reuses it across every search;
/// construction is the only allocation of the backing arrays, and the open
/// heap is drained (hence empty) between calls.
///
/// There is no success/failure signal: an empty returned path is the only
/// "no progress possible" indicator, and a non-empty path may stop short of
/// every goal (closest approach reachable within the budget).
pub struct PathPlanner {
    scratch: SearchScratch,
    heap: BinaryHeap<Reverse<(u32, u32)>>,
    node_budget: usize,
    path_cap: usize,
    goal_candidates: usize,
    /// Expansions performed by the most recent search (instrumentation).
    last_expanded: usize,
}

impl PathPlanner {
    /// Create a planner for a `width × height` map with the given tunables.
    pub fn new(width: i32, height: i32, config: &NavConfig) -> Self {
        Self {
            scratch: SearchScratch::new(width, height),
            heap: BinaryHeap::new(),
            node_budget: config.node_budget,
            path_cap: config.path_cap,
            goal_candidates: config.goal_candidates,
            last_expanded: 0,
        }
    }

    /// Node expansions performed by the most recent [`plan`](Self::plan) call.
    #[inline]
    pub fn last_expanded(&self) -> usize {
        self.last_expanded
    }

    /// Read access to the shared scratch (tests assert on generations).
    #[inline]
    pub fn scratch(&self) -> &SearchScratch {
        &self.scratch
    }

    /// Build the candidate goal set for `target`: the target itself when
    /// passable, then its passable neighbors, capped at `goal_candidates`
    /// (or twice that when `widen` is set — used once an agent is stuck and
    /// any adjacent approach is acceptable).
    pub fn goal_set(
        &self,
        target: GridPos,
        passable: impl Fn(GridPos) -> bool,
        widen: bool,
    ) -> Vec<GridPos> {
        let cap = if widen { self.goal_candidates * 2 } else { self.goal_candidates };
        let mut goals = Vec::with_capacity(cap);
        if passable(target) {
            goals.push(target);
        }
        for n in target.neighbors8() {
            if goals.len() >= cap {
                break;
            }
            if passable(n) {
                goals.push(n);
            }
        }
        goals
    }

    /// Compute a best-effort path from `start` toward the closest of `goals`.
    ///
    /// The returned path includes both `start` and the reached cell, capped
    /// at `path_cap` waypoints (truncated at the goal end — waypoints are
    /// consumed from the start, so the start-adjacent prefix is the useful
    /// part).  Returns an empty vec when no goal is given, `start` is out of
    /// bounds, or no progress beyond `start` is possible.
    pub fn plan(
        &mut self,
        passable: impl Fn(GridPos) -> bool,
        start: GridPos,
        goals: &[GridPos],
    ) -> Vec<GridPos> {
        self.last_expanded = 0;
        let Some(start_idx) = self.scratch.index_of(start) else {
            return Vec::new();
        };
        if goals.is_empty() {
            return Vec::new();
        }

        let heuristic = |pos: GridPos| -> u32 {
            goals
                .iter()
                .map(|g| pos.chebyshev(*g) as u32)
                .min()
                .unwrap_or(u32::MAX)
        };

        self.scratch.begin_search();
        self.heap.clear();
        self.scratch.set_g_score(start_idx, 0, NO_PARENT);
        self.heap.push(Reverse((heuristic(start), start_idx)));

        // Closest approach so far: (h, cell).  Falls back to the start, which
        // reconstructs to an empty path.
        let mut best = (heuristic(start), start_idx);

        while let Some(Reverse((_, idx))) = self.heap.pop() {
            if self.scratch.is_closed(idx) {
                continue; // stale heap entry
            }
            self.scratch.close(idx);
            self.last_expanded += 1;

            let pos = self.scratch.pos_of(idx);
            let h = heuristic(pos);
            if h == 0 {
                return self.reconstruct(idx, start_idx);
            }
            if h < best.0 {
                best = (h, idx);
            }
            if self.last_expanded >= self.node_budget {
                break; // budget exhausted — best effort below
            }

            let g = self.scratch.g_score(idx);
            for n in pos.neighbors8() {
                let Some(n_idx) = self.scratch.index_of(n) else {
                    continue;
                };
                if self.scratch.is_closed(n_idx) || !passable(n) {
                    continue;
                }
                let new_g = g + 1; // uniform step cost
                if new_g < self.scratch.g_score(n_idx) {
                    self.scratch.set_g_score(n_idx, new_g, idx);
                    self.heap.push(Reverse((new_g + heuristic(n), n_idx)));
                }
            }
        }

        self.heap.clear();
        if best.1 == start_idx {
            return Vec::new();
        }
        self.reconstruct(best.1, start_idx)
    }

    /// Walk the predecessor chain from `end` back to `start`, reverse it and
    /// apply the output cap.
    fn reconstruct(&mut self, end: u32, start_idx: u32) -> Vec<GridPos> {
        self.heap.clear();
        let mut path = vec![self.scratch.pos_of(end)];
        let mut cur = end;
        while cur != start_idx {
            match self.scratch.parent_of(cur) {
                Some(p) => cur = p,
                None => break, // chain ends at the search root
            }
            path.push(self.scratch.pos_of(cur));
        }
        path.reverse();
        path.truncate(self.path_cap);
        path
    }
}
