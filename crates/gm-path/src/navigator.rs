//! Strategy selection and cross-tick path reuse.

use gm_core::{Direction, GridPos, NavConfig, Tick, WorldView};

use crate::greedy::greedy_step;
use crate::planner::PathPlanner;
use crate::stuck::{PositionRing, StuckState};

// ── NavState ──────────────────────────────────────────────────────────────────

/// Per-agent navigation state: the planned-path buffer, the recent-position
/// ring, the stuck flag, and the blocked-target memory entry.
///
/// Agent-local by design — O(agents) memory, no pooling, no cross-agent
/// aliasing to reason about.
#[derive(Clone, Debug)]
pub struct NavState {
    path: Vec<GridPos>,
    cursor: usize,
    target: Option<GridPos>,
    pub ring: PositionRing,
    pub stuck: StuckState,
    /// A target recently proven unreachable; seek behaviors skip it until
    /// the tick expires rather than replanning toward it every tick.
    blocked: Option<(GridPos, Tick)>,
}

impl NavState {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            path: Vec::new(),
            cursor: 0,
            target: None,
            ring: PositionRing::new(config.stuck_window),
            stuck: StuckState::default(),
            blocked: None,
        }
    }

    /// Drop all transient state (used on spawn/respawn).
    pub fn reset(&mut self) {
        self.path.clear();
        self.cursor = 0;
        self.target = None;
        self.ring.clear();
        self.stuck.clear();
        self.blocked = None;
    }

    /// `true` while a cached path toward `target` exists.
    pub fn has_path_to(&self, target: GridPos) -> bool {
        self.target == Some(target) && self.cursor < self.path.len()
    }

    /// `true` if `target` is remembered as blocked at `now`.
    pub fn is_blocked_target(&self, target: GridPos, now: Tick) -> bool {
        matches!(self.blocked, Some((pos, until)) if pos == target && now < until)
    }

    /// Remember `target` as blocked until `until`.
    pub fn mark_blocked(&mut self, target: GridPos, until: Tick) {
        self.blocked = Some((target, until));
    }

    fn invalidate_path(&mut self) {
        self.path.clear();
        self.cursor = 0;
        self.target = None;
    }

    fn adopt_path(&mut self, path: Vec<GridPos>, target: GridPos, from: GridPos) {
        self.path = path;
        self.target = Some(target);
        // Skip the leading start waypoint if present.
        self.cursor = usize::from(self.path.first() == Some(&from));
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Chooses between the greedy mover and the planner, reusing cached paths
/// across ticks while they stay valid.
///
/// Strategy rule: `distance(from, target) < greedy_range` **and** not stuck
/// → greedy; otherwise the planner (with a widened goal set once stuck).
pub struct Navigator {
    planner: PathPlanner,
    greedy_range: i32,
    blocked_memory_ticks: u64,
}

impl Navigator {
    pub fn new(width: i32, height: i32, config: &NavConfig) -> Self {
        Self {
            planner: PathPlanner::new(width, height, config),
            greedy_range: config.greedy_range,
            blocked_memory_ticks: config.stuck_relief_ticks,
        }
    }

    /// The owned planner (tests and instrumentation).
    #[inline]
    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// Decide this tick's single step from `from` toward `target`.
    ///
    /// `None` means "no useful step exists" — the agent stands still.  Any
    /// cached-path violation (changed target, impassable next waypoint) is
    /// detected here, invalidates the buffer and triggers one replan; a
    /// replan that yields no progress records the blocked-target memory.
    pub fn next_step(
        &mut self,
        world: &dyn WorldView,
        nav: &mut NavState,
        from: GridPos,
        target: GridPos,
        now: Tick,
    ) -> Option<Direction> {
        if from == target {
            return None;
        }
        let stuck = nav.stuck.is_stuck();

        // Close and unstuck: one greedy step, no planning.
        if from.chebyshev(target) < self.greedy_range && !stuck {
            nav.invalidate_path();
            if let Some(dir) = greedy_step(|p| world.passable(p), from, target, None) {
                return Some(dir);
            }
            // Fully blocked locally — fall through to the planner.
        }

        // Reuse the cached path while the target is unchanged and the next
        // waypoint is still adjacent and passable.
        if nav.has_path_to(target) && !stuck {
            while nav.cursor < nav.path.len() && nav.path[nav.cursor] == from {
                nav.cursor += 1;
            }
            if nav.cursor < nav.path.len() {
                let next = nav.path[nav.cursor];
                if from.adjacent(next) && world.passable(next) {
                    return from.direction_to(next);
                }
            }
            nav.invalidate_path();
        } else if !nav.has_path_to(target) {
            nav.invalidate_path();
        }

        // Replan.  Once stuck the goal set is widened so any adjacent
        // approach to the target counts as success.
        let goals = self.planner.goal_set(target, |p| world.passable(p), stuck);
        let path = self.planner.plan(|p| world.passable(p), from, &goals);

        if path.len() < 2 {
            nav.invalidate_path();
            nav.mark_blocked(target, now.offset(self.blocked_memory_ticks));
            // Last resort while stuck: sidestep away from the tile we just
            // came from, even if it doesn't reduce distance this tick.
            if stuck {
                // Most recent position other than where we stand now.
                let prev = nav.ring.iter().filter(|p| *p != from).last();
                let avoid = prev.and_then(|p| from.direction_to(p));
                return greedy_step(|p| world.passable(p), from, target, avoid);
            }
            return None;
        }

        nav.adopt_path(path, target, from);
        let next = nav.path[nav.cursor];
        nav.cursor += 1;
        from.direction_to(next)
    }
}
