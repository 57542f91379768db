//! The warrior role: fight what's close, hunt what's near, guard the camp.

use std::sync::Arc;

use gm_behavior::{Action, CacheKey, OptionCtx, OptionDef, Role};
use gm_core::{BuildingKind, EntityKind, GridPos};

use crate::common::{hostile_adjacent, move_toward, nearest_hostile, wander_option, wander_step};

/// Hostiles inside this radius get engaged.
pub const AGGRO_RADIUS: i32 = 12;

/// How far a patrolling warrior is allowed to drift from its camp.
pub const PATROL_RADIUS: i32 = 6;

/// Build the warrior option list.
///
/// Priority order: fight → engage → patrol → wander.
pub fn warrior() -> Role {
    Arc::from(vec![fight(), engage(), patrol(), wander_option()])
}

fn find_camp(ctx: &OptionCtx<'_>) -> Option<GridPos> {
    // Cold path: camps are rare, a full scan per cache refill is fine.
    ctx.world
        .entities_of_kind(EntityKind::Building(BuildingKind::Camp))
        .into_iter()
        .filter(|(_, pos)| {
            ctx.world.entity_at(*pos).is_some_and(|e| e.team == ctx.team)
        })
        .min_by_key(|(id, pos)| (ctx.pos.chebyshev(*pos), *id))
        .map(|(_, pos)| pos)
}

/// Attack the adjacent hostile.  Not interruptible: once in melee, stay in
/// melee until the target dies or disengages.
fn fight() -> OptionDef {
    OptionDef::new(
        "fight",
        false,
        |ctx, _| hostile_adjacent(ctx).is_some(),
        |ctx, _| match hostile_adjacent(ctx) {
            Some(dir) => Action::attack(dir),
            // Target died since the predicate ran.
            None => Action::idle(),
        },
        |ctx, _| hostile_adjacent(ctx).is_none(),
    )
}

/// Close the distance to the nearest hostile inside the aggro radius.
fn engage() -> OptionDef {
    OptionDef::new(
        "engage",
        true,
        |ctx, _| nearest_hostile(ctx, AGGRO_RADIUS).is_some(),
        |ctx, scratch| {
            let target = scratch.caches.lookup(CacheKey::NearestEnemy, ctx.tick, ctx.pos, || {
                nearest_hostile(ctx, AGGRO_RADIUS).map(|(_, pos)| pos)
            });
            match target {
                Some(pos) => move_toward(ctx, scratch, pos),
                None => Action::idle(),
            }
        },
        |ctx, _| hostile_adjacent(ctx).is_some() || nearest_hostile(ctx, AGGRO_RADIUS).is_none(),
    )
}

/// Loiter near the camp: walk back when too far, drift randomly when close.
fn patrol() -> OptionDef {
    OptionDef::new(
        "patrol",
        true,
        |ctx, _| find_camp(ctx).is_some(),
        |ctx, scratch| {
            let camp = scratch.caches.lookup(
                CacheKey::NearestBuilding(BuildingKind::Camp),
                ctx.tick,
                ctx.pos,
                || find_camp(ctx),
            );
            match camp {
                Some(pos) if ctx.pos.chebyshev(pos) > PATROL_RADIUS => {
                    move_toward(ctx, scratch, pos)
                }
                Some(_) => wander_step(ctx, scratch),
                None => Action::idle(),
            }
        },
        |ctx, _| nearest_hostile(ctx, AGGRO_RADIUS).is_some(),
    )
}
