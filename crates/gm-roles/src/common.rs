//! Movement and perception helpers shared by the role libraries.

use gm_behavior::{Action, AgentScratch, OptionCtx, OptionDef};
use gm_core::{Direction, EntityId, EntityKind, EntityRef, GridPos};

/// How close a hostile must be before any role's evade behavior kicks in.
pub const EVADE_RADIUS: i32 = 3;

/// One navigated step toward `target`; idle when no useful step exists.
pub(crate) fn move_toward(
    ctx: &OptionCtx<'_>,
    scratch: &mut AgentScratch<'_>,
    target: GridPos,
) -> Action {
    match scratch.navigator.next_step(ctx.world, scratch.nav, ctx.pos, target, ctx.tick) {
        Some(dir) => Action::step(dir),
        None => Action::idle(),
    }
}

/// One random step; idle if the rolled direction is blocked (no re-roll, so
/// agents drift more slowly through cluttered terrain).
pub(crate) fn wander_step(ctx: &OptionCtx<'_>, scratch: &mut AgentScratch<'_>) -> Action {
    let dir = Direction::ALL[scratch.rng.gen_range(0..Direction::ALL.len())];
    if ctx.world.passable(ctx.pos.step(dir)) {
        Action::step(dir)
    } else {
        Action::idle()
    }
}

/// First adjacent tile (in [`Direction::ALL`] order) whose occupant matches.
pub(crate) fn adjacent_match(
    ctx: &OptionCtx<'_>,
    pred: impl Fn(EntityRef) -> bool,
) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&dir| {
        ctx.world.entity_at(ctx.pos.step(dir)).is_some_and(&pred)
    })
}

/// Adjacent hostile agent, if any.
pub(crate) fn hostile_adjacent(ctx: &OptionCtx<'_>) -> Option<Direction> {
    adjacent_match(ctx, |e| e.kind == EntityKind::Agent && e.team.hostile_to(ctx.team))
}

/// Nearest hostile agent within `radius` of the deciding agent, excluding
/// the agent's own tile.
pub(crate) fn nearest_hostile(ctx: &OptionCtx<'_>, radius: i32) -> Option<(EntityId, GridPos)> {
    ctx.index.nearest(ctx.pos, radius, |_, pos| {
        pos != ctx.pos
            && ctx
                .world
                .entity_at(pos)
                .is_some_and(|e| e.kind == EntityKind::Agent && e.team.hostile_to(ctx.team))
    })
}

/// Step that strictly increases distance from `threat`; idle when cornered.
pub(crate) fn evade_step(ctx: &OptionCtx<'_>, threat: GridPos) -> Action {
    let current = ctx.pos.chebyshev(threat);
    let mut best: Option<(i32, Direction)> = None;
    for dir in Direction::ALL {
        let dest = ctx.pos.step(dir);
        if !ctx.world.passable(dest) {
            continue;
        }
        let dist = dest.chebyshev(threat);
        match best {
            Some((bd, _)) if bd >= dist => {}
            _ => best = Some((dist, dir)),
        }
    }
    match best {
        Some((dist, dir)) if dist > current => Action::step(dir),
        _ => Action::idle(),
    }
}

/// The shared top-priority "get away from hostiles" option.
///
/// Not interruptible — nothing outranks staying alive.
pub(crate) fn evade_option() -> OptionDef {
    OptionDef::new(
        "evade",
        false,
        |ctx, _| nearest_hostile(ctx, EVADE_RADIUS).is_some(),
        |ctx, _| match nearest_hostile(ctx, EVADE_RADIUS) {
            Some((_, threat)) => evade_step(ctx, threat),
            None => Action::idle(),
        },
        |ctx, _| nearest_hostile(ctx, EVADE_RADIUS).is_none(),
    )
}

/// The universal lowest-priority fallback: take one random step and yield.
pub(crate) fn wander_option() -> OptionDef {
    OptionDef::new(
        "wander",
        true,
        |_, _| true,
        |ctx, scratch| wander_step(ctx, scratch),
        |_, _| true,
    )
}
