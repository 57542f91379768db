//! The gatherer role: harvest one resource kind and haul it home.

use std::sync::Arc;

use gm_behavior::{Action, CacheKey, OptionCtx, OptionDef, Role};
use gm_core::{BuildingKind, EntityKind, GridPos, ResourceKind};

use crate::common::{adjacent_match, evade_option, move_toward, wander_option};

/// How far a gatherer searches for resources and stockpiles.
pub const GATHER_RADIUS: i32 = 24;

/// Build the gatherer option list for one resource kind.
///
/// Priority order: evade → deposit → harvest → seek → wander.  Everything
/// below evade is interruptible, so a hostile closing in preempts work
/// mid-haul.
pub fn gatherer(kind: ResourceKind) -> Role {
    Arc::from(vec![
        evade_option(),
        deposit(),
        harvest(kind),
        seek(kind),
        wander_option(),
    ])
}

fn resource_adjacent(ctx: &OptionCtx<'_>, kind: ResourceKind) -> Option<gm_core::Direction> {
    adjacent_match(ctx, |e| e.kind == EntityKind::Resource(kind))
}

fn find_resource(ctx: &OptionCtx<'_>, kind: ResourceKind) -> Option<GridPos> {
    ctx.index
        .nearest(ctx.pos, GATHER_RADIUS, |_, pos| {
            ctx.world
                .entity_at(pos)
                .is_some_and(|e| e.kind == EntityKind::Resource(kind))
        })
        .map(|(_, pos)| pos)
}

/// Carry cargo to the nearest friendly stockpile and hand it over.
fn deposit() -> OptionDef {
    OptionDef::new(
        "deposit",
        true,
        |ctx, _| ctx.cargo > 0,
        |ctx, scratch| {
            let friendly_stockpile = |e: gm_core::EntityRef| {
                e.kind == EntityKind::Building(BuildingKind::Stockpile) && e.team == ctx.team
            };
            if let Some(dir) = adjacent_match(ctx, &friendly_stockpile) {
                return Action::give(dir);
            }
            let key = CacheKey::NearestBuilding(BuildingKind::Stockpile);
            let target = scratch.caches.lookup(key, ctx.tick, ctx.pos, || {
                ctx.index
                    .nearest(ctx.pos, GATHER_RADIUS, |_, pos| {
                        ctx.world.entity_at(pos).is_some_and(&friendly_stockpile)
                    })
                    .map(|(_, pos)| pos)
            });
            match target {
                Some(pos) => move_toward(ctx, scratch, pos),
                None => Action::idle(),
            }
        },
        |ctx, _| ctx.cargo == 0,
    )
}

/// Work an adjacent resource node, refreshing the agent's memory of it.
fn harvest(kind: ResourceKind) -> OptionDef {
    OptionDef::new(
        "harvest",
        true,
        move |ctx, _| resource_adjacent(ctx, kind).is_some(),
        move |ctx, scratch| match resource_adjacent(ctx, kind) {
            Some(dir) => {
                scratch.memory.record(kind, ctx.pos.step(dir), ctx.tick);
                Action::use_adjacent(dir)
            }
            // Node vanished since the predicate ran: stand down this tick.
            None => Action::idle(),
        },
        move |ctx, _| resource_adjacent(ctx, kind).is_none(),
    )
}

/// Head toward a known or discoverable resource node.
///
/// A remembered sighting is preferred over a fresh search, and re-validated
/// on arrival: standing next to where the node should be and finding nothing
/// wipes the memory so the next act falls through to a real search.
fn seek(kind: ResourceKind) -> OptionDef {
    OptionDef::new(
        "seek",
        true,
        move |ctx, scratch| {
            scratch.memory.recall(kind).is_some() || find_resource(ctx, kind).is_some()
        },
        move |ctx, scratch| {
            if let Some((pos, _)) = scratch.memory.recall(kind) {
                let vanished = ctx.pos.chebyshev(pos) <= 1
                    && ctx
                        .world
                        .entity_at(pos)
                        .is_none_or(|e| e.kind != EntityKind::Resource(kind));
                if vanished || scratch.nav.is_blocked_target(pos, ctx.tick) {
                    scratch.memory.forget(kind);
                    scratch.caches.invalidate(CacheKey::NearestResource(kind));
                }
            }
            let target = match scratch.memory.recall(kind) {
                Some((pos, _)) => Some(pos),
                None => scratch.caches.lookup(
                    CacheKey::NearestResource(kind),
                    ctx.tick,
                    ctx.pos,
                    || find_resource(ctx, kind),
                ),
            };
            match target {
                Some(pos) => move_toward(ctx, scratch, pos),
                None => Action::idle(),
            }
        },
        move |ctx, scratch| {
            resource_adjacent(ctx, kind).is_some()
                || (scratch.memory.recall(kind).is_none() && find_resource(ctx, kind).is_none())
        },
    )
}
