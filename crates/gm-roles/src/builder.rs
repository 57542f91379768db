//! The builder role: advance construction sites, or found new ones.

use std::sync::Arc;

use gm_behavior::{Action, CacheKey, OptionCtx, OptionDef, Role};
use gm_core::{BuildingKind, Direction, EntityKind};

use crate::common::{adjacent_match, evade_option, move_toward, wander_option};

/// How far a builder searches for construction sites.
pub const SITE_RADIUS: i32 = 24;

/// Wire build-target index for placing a new site (matches the executor's
/// [`BuildingKind`] ordering).
pub const SITE_BUILD_INDEX: u8 = 2;

/// Build the builder option list.
///
/// Priority order: evade → construct → go-to-site → plant → wander.
pub fn builder() -> Role {
    Arc::from(vec![
        evade_option(),
        construct(),
        go_to_site(),
        plant(),
        wander_option(),
    ])
}

fn site_adjacent(ctx: &OptionCtx<'_>) -> Option<Direction> {
    adjacent_match(ctx, |e| {
        e.kind == EntityKind::Building(BuildingKind::Site) && e.team == ctx.team
    })
}

/// An adjacent tile with nothing on it, for founding a new site.
fn clear_adjacent(ctx: &OptionCtx<'_>) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&dir| {
        let dest = ctx.pos.step(dir);
        ctx.world.passable(dest) && ctx.world.entity_at(dest).is_none()
    })
}

/// Advance the adjacent construction site.
fn construct() -> OptionDef {
    OptionDef::new(
        "construct",
        true,
        |ctx, _| site_adjacent(ctx).is_some(),
        |ctx, _| match site_adjacent(ctx) {
            Some(dir) => Action::build(dir),
            // Site finished or demolished since the predicate ran.
            None => Action::idle(),
        },
        |ctx, _| site_adjacent(ctx).is_none(),
    )
}

/// Walk to the nearest friendly site.
fn go_to_site() -> OptionDef {
    OptionDef::new(
        "go-to-site",
        true,
        |ctx, _| find_site(ctx).is_some(),
        |ctx, scratch| {
            let key = CacheKey::NearestBuilding(BuildingKind::Site);
            let target =
                scratch.caches.lookup(key, ctx.tick, ctx.pos, || find_site(ctx));
            match target {
                Some(pos) => move_toward(ctx, scratch, pos),
                None => Action::idle(),
            }
        },
        |ctx, _| site_adjacent(ctx).is_some() || find_site(ctx).is_none(),
    )
}

fn find_site(ctx: &OptionCtx<'_>) -> Option<gm_core::GridPos> {
    ctx.index
        .nearest(ctx.pos, SITE_RADIUS, |_, pos| {
            ctx.world.entity_at(pos).is_some_and(|e| {
                e.kind == EntityKind::Building(BuildingKind::Site) && e.team == ctx.team
            })
        })
        .map(|(_, pos)| pos)
}

/// Found a new site when carrying materials and standing next to open ground.
fn plant() -> OptionDef {
    OptionDef::new(
        "plant",
        true,
        |ctx, _| ctx.cargo > 0 && clear_adjacent(ctx).is_some(),
        |ctx, _| match clear_adjacent(ctx) {
            Some(_) => Action::plant_structure(SITE_BUILD_INDEX),
            None => Action::idle(),
        },
        |_, _| true,
    )
}
