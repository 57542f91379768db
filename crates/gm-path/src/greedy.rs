//! O(8) single-step greedy movement.

use gm_core::{Direction, GridPos};

/// Pick the single step that most reduces Chebyshev distance to `target`.
///
/// Exactly 8 candidate checks — no search, no allocation.  A direction is a
/// candidate only if its destination is passable, it is not `avoid` (used by
/// stuck recovery to forbid bouncing straight back), and it strictly reduces
/// the distance.  Among candidates the largest reduction wins; ties break on
/// [`Direction::ALL`] order, so the choice is deterministic.
///
/// Returns `None` when every improving direction is blocked — the caller
/// falls back to the planner or stands still.
pub fn greedy_step(
    passable: impl Fn(GridPos) -> bool,
    from: GridPos,
    target: GridPos,
    avoid: Option<Direction>,
) -> Option<Direction> {
    if from == target {
        return None;
    }
    let current = from.chebyshev(target);
    let mut best: Option<(i32, Direction)> = None;

    for dir in Direction::ALL {
        if avoid == Some(dir) {
            continue;
        }
        let dest = from.step(dir);
        if !passable(dest) {
            continue;
        }
        let dist = dest.chebyshev(target);
        if dist >= current {
            continue;
        }
        match best {
            Some((bd, _)) if bd <= dist => {}
            _ => best = Some((dist, dir)),
        }
    }
    best.map(|(_, dir)| dir)
}
