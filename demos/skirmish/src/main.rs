//! Two teams of gatherers, warriors and builders on one map.
//!
//! The demo plays both sides of the engine contract: each tick it asks the
//! [`DecisionEngine`] for actions against the frozen world, then acts as the
//! executor — moving agents, transferring cargo, resolving attacks — and
//! reports every mutation back through the engine doors.

use gm_behavior::{EncodedAction, Verb};
use gm_core::{
    AgentId, BuildingKind, Direction, EntityId, EntityKind, EntityRef, GridPos, NavConfig,
    ResourceKind, SimRng, Team, WorldView,
};
use gm_roles::{RoleTable, builder, gatherer, warrior};
use gm_sim::{DecisionEngine, DecisionObserver, EngineBuilder, EngineResult, GridWorld};

const WIDTH: i32 = 64;
const HEIGHT: i32 = 48;
const AGENTS_PER_TEAM: usize = 12;
const TICKS: u64 = 200;

/// Units a gatherer can carry at once.
const CARRY_CAP: u8 = 3;
/// Units in a fresh resource node.
const NODE_STOCK: u8 = 12;
/// Build actions to finish a site (it becomes a stockpile).
const SITE_WORK: u8 = 5;

fn main() -> EngineResult<()> {
    let config = NavConfig { seed: 7, ..NavConfig::default() };
    let mut rng = SimRng::new(config.seed);

    let mut roles = RoleTable::new();
    let gatherer_id = roles.register(gatherer(ResourceKind::Wood));
    let warrior_id = roles.register(warrior());
    let builder_id = roles.register(builder());

    let agent_count = AGENTS_PER_TEAM * 2;
    let mut engine = EngineBuilder::new(config, WIDTH, HEIGHT, agent_count)
        .roles(roles)
        .build()?;
    let mut world = GridWorld::new(WIDTH, HEIGHT);
    let mut next_id = agent_count as u32;

    let camps = [GridPos::new(8, 24), GridPos::new(55, 24)];
    scatter_walls(&mut world, &camps, &mut rng);

    for (t, &camp) in camps.iter().enumerate() {
        let team = Team(t as u8);
        place(&mut engine, &mut world, &mut next_id, camp, EntityKind::Building(BuildingKind::Camp), team, 0);
        place(&mut engine, &mut world, &mut next_id, GridPos::new(camp.x, camp.y - 3), EntityKind::Building(BuildingKind::Stockpile), team, 0);
        place(&mut engine, &mut world, &mut next_id, GridPos::new(camp.x, camp.y + 3), EntityKind::Building(BuildingKind::Site), team, 0);

        for i in 0..AGENTS_PER_TEAM {
            let agent = AgentId((t * AGENTS_PER_TEAM + i) as u32);
            let role = match i {
                0..=4 => gatherer_id,
                5..=8 => warrior_id,
                _ => builder_id,
            };
            let at = free_tile_near(&world, camp, &mut rng);
            engine.spawn(agent, at, role, team);
            world.place(
                at,
                EntityRef { id: DecisionEngine::agent_entity(agent), kind: EntityKind::Agent, team, cargo: 0 },
            );
        }
    }

    // Wood down the contested middle of the map.
    for _ in 0..40 {
        let at = GridPos::new(rng.gen_range(20..44), rng.gen_range(4..44));
        if world.passable(at) {
            place(&mut engine, &mut world, &mut next_id, at, EntityKind::Resource(ResourceKind::Wood), Team::NEUTRAL, NODE_STOCK);
        }
    }

    let mut census = Census::default();
    for _ in 0..TICKS {
        engine.decide_tick_with(&world, &mut census);
        apply_actions(&mut engine, &mut world, &mut next_id);
    }

    report(&engine, &world);
    Ok(())
}

// ── Map generation ────────────────────────────────────────────────────────────

fn scatter_walls(world: &mut GridWorld, camps: &[GridPos], rng: &mut SimRng) {
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let at = GridPos::new(x, y);
            if camps.iter().any(|c| c.chebyshev(at) <= 6) {
                continue;
            }
            if rng.gen_bool(0.05) {
                world.add_wall(at);
            }
        }
    }
}

fn free_tile_near(world: &GridWorld, center: GridPos, rng: &mut SimRng) -> GridPos {
    loop {
        let at = GridPos::new(center.x + rng.gen_range(-5..=5), center.y + rng.gen_range(-5..=5));
        if world.passable(at) {
            return at;
        }
    }
}

fn place(
    engine: &mut DecisionEngine,
    world: &mut GridWorld,
    next_id: &mut u32,
    at: GridPos,
    kind: EntityKind,
    team: Team,
    cargo: u8,
) {
    let id = EntityId(*next_id);
    *next_id += 1;
    world.place(at, EntityRef { id, kind, team, cargo });
    engine.insert_entity(id, at);
}

// ── Executor ──────────────────────────────────────────────────────────────────

/// Apply one tick's actions, mirroring every mutation back into the engine.
fn apply_actions(engine: &mut DecisionEngine, world: &mut GridWorld, next_id: &mut u32) {
    let actions: Vec<EncodedAction> = engine.actions().to_vec();
    for (i, action) in actions.iter().enumerate() {
        let agent = AgentId(i as u32);
        if !engine.store().is_alive(agent) {
            continue;
        }
        let from = engine.store().pos[i];
        let dir = Direction::from_index(action.arg);

        match action.verb {
            v if v == Verb::Move as u8 => {
                if let Some(dir) = dir {
                    let to = from.step(dir);
                    if world.move_entity(from, to) {
                        engine.set_position(agent, to);
                    }
                }
            }
            v if v == Verb::Use as u8 => {
                if let Some(dir) = dir {
                    harvest(engine, world, from, from.step(dir));
                }
            }
            v if v == Verb::Give as u8 => {
                if let Some(dir) = dir {
                    give(world, from, from.step(dir));
                }
            }
            v if v == Verb::Attack as u8 => {
                if let Some(dir) = dir {
                    attack(engine, world, from.step(dir));
                }
            }
            v if v == Verb::Build as u8 => {
                if let Some(dir) = dir {
                    build(world, from.step(dir));
                }
            }
            v if v == Verb::PlantStructure as u8 => {
                plant_site(engine, world, next_id, from);
            }
            v if v == Verb::Orient as u8 => {
                if let Some(dir) = dir {
                    engine.set_facing(agent, dir);
                }
            }
            _ => {}
        }
    }
}

/// Move one unit from a resource node into the acting agent's hands.
fn harvest(engine: &mut DecisionEngine, world: &mut GridWorld, actor: GridPos, target: GridPos) {
    let Some(node) = world.entity_at(target) else {
        return;
    };
    if !matches!(node.kind, EntityKind::Resource(_)) {
        return;
    }
    {
        let Some(carrier) = world.entity_at_mut(actor) else {
            return;
        };
        if carrier.cargo >= CARRY_CAP {
            return;
        }
        carrier.cargo += 1;
    }
    let mut depleted = false;
    if let Some(node) = world.entity_at_mut(target) {
        node.cargo = node.cargo.saturating_sub(1);
        depleted = node.cargo == 0;
    }
    if depleted {
        world.remove_at(target);
        engine.remove_entity(node.id);
    }
}

/// Hand the actor's whole load to an adjacent building.
fn give(world: &mut GridWorld, actor: GridPos, target: GridPos) {
    let load = match world.entity_at(actor) {
        Some(carrier) if carrier.cargo > 0 => carrier.cargo,
        _ => return,
    };
    let Some(receiver) = world.entity_at_mut(target) else {
        return;
    };
    if !matches!(receiver.kind, EntityKind::Building(_)) {
        return;
    }
    receiver.cargo = receiver.cargo.saturating_add(load);
    if let Some(carrier) = world.entity_at_mut(actor) {
        carrier.cargo = 0;
    }
}

/// One-hit combat: an attacked agent dies on the spot.
fn attack(engine: &mut DecisionEngine, world: &mut GridWorld, target: GridPos) {
    let Some(victim) = world.entity_at(target) else {
        return;
    };
    if victim.kind != EntityKind::Agent {
        return;
    }
    world.remove_at(target);
    engine.kill(AgentId(victim.id.0));
}

/// Advance a site; a finished site opens as a stockpile.
fn build(world: &mut GridWorld, target: GridPos) {
    let Some(site) = world.entity_at_mut(target) else {
        return;
    };
    if site.kind != EntityKind::Building(BuildingKind::Site) {
        return;
    }
    site.cargo += 1;
    if site.cargo >= SITE_WORK {
        site.kind = EntityKind::Building(BuildingKind::Stockpile);
        site.cargo = 0;
    }
}

/// Found a new site on the first clear neighbor, spending one carried unit.
fn plant_site(engine: &mut DecisionEngine, world: &mut GridWorld, next_id: &mut u32, actor: GridPos) {
    let (team, load) = match world.entity_at(actor) {
        Some(founder) => (founder.team, founder.cargo),
        None => return,
    };
    if load == 0 {
        return;
    }
    let Some(spot) = Direction::ALL
        .into_iter()
        .map(|d| actor.step(d))
        .find(|&p| world.passable(p))
    else {
        return;
    };
    if let Some(founder) = world.entity_at_mut(actor) {
        founder.cargo -= 1;
    }
    place(engine, world, next_id, spot, EntityKind::Building(BuildingKind::Site), team, 0);
}

// ── Reporting ─────────────────────────────────────────────────────────────────

/// Prints a verb histogram every 20 ticks.
#[derive(Default)]
struct Census {
    verbs: [usize; 10],
}

impl DecisionObserver for Census {
    fn on_agent_decided(&mut self, _tick: gm_core::Tick, _agent: AgentId, action: EncodedAction) {
        self.verbs[action.verb as usize] += 1;
    }

    fn on_tick_end(&mut self, tick: gm_core::Tick, decided: usize) {
        if tick.0 % 20 != 19 {
            return;
        }
        let v = &self.verbs;
        println!(
            "tick {:>3}  alive {:>2}  move {:>3}  use {:>3}  give {:>3}  attack {:>3}  build {:>3}  plant {:>3}",
            tick.0,
            decided,
            v[Verb::Move as usize],
            v[Verb::Use as usize],
            v[Verb::Give as usize],
            v[Verb::Attack as usize],
            v[Verb::Build as usize],
            v[Verb::PlantStructure as usize],
        );
        self.verbs = [0; 10];
    }
}

fn report(engine: &DecisionEngine, world: &GridWorld) {
    for team in [Team(0), Team(1)] {
        let alive = engine
            .store()
            .agent_ids()
            .filter(|&a| engine.store().is_alive(a) && engine.store().team[a.index()] == team)
            .count();
        let stored: u32 = world
            .entities_of_kind(EntityKind::Building(BuildingKind::Stockpile))
            .into_iter()
            .filter_map(|(_, pos)| world.entity_at(pos))
            .filter(|e| e.team == team)
            .map(|e| e.cargo as u32)
            .sum();
        println!("team {}  survivors {:>2}  stockpiled {:>3}", team.0, alive, stored);
    }
}
