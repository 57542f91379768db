//! Unit tests for gm-roles.

#[cfg(test)]
mod helpers {
    use std::collections::{HashMap, HashSet};

    use gm_agent::{AgentMemory, NO_OPTION};
    use gm_behavior::{
        Action, ActiveSlot, AgentScratch, OptionCtx, OptionEngine, Role, RoleCaches,
    };
    use gm_core::{
        AgentId, AgentRng, EntityId, EntityKind, EntityRef, GridPos, NavConfig, Team, Tick,
        WorldView,
    };
    use gm_path::{NavState, Navigator};
    use gm_spatial::SpatialIndex;

    /// Map fixture: entity tiles and walls are impassable, everything in a
    /// 32×32 bound is open otherwise.
    pub struct TestWorld {
        pub entities: HashMap<GridPos, EntityRef>,
        pub walls: HashSet<GridPos>,
    }

    impl TestWorld {
        pub fn new() -> Self {
            Self { entities: HashMap::new(), walls: HashSet::new() }
        }
    }

    impl WorldView for TestWorld {
        fn passable(&self, pos: GridPos) -> bool {
            pos.x >= 0
                && pos.y >= 0
                && pos.x < 32
                && pos.y < 32
                && !self.walls.contains(&pos)
                && !self.entities.contains_key(&pos)
        }

        fn entity_at(&self, pos: GridPos) -> Option<EntityRef> {
            self.entities.get(&pos).copied()
        }

        fn entities_of_kind(&self, kind: EntityKind) -> Vec<(EntityId, GridPos)> {
            let mut out: Vec<_> = self
                .entities
                .iter()
                .filter(|(_, e)| e.kind == kind)
                .map(|(pos, e)| (e.id, *pos))
                .collect();
            out.sort();
            out
        }
    }

    /// One deciding agent plus the world it perceives.
    pub struct Fixture {
        pub config: NavConfig,
        pub world: TestWorld,
        pub index: SpatialIndex,
        pub rng: AgentRng,
        pub nav: NavState,
        pub memory: AgentMemory,
        pub navigator: Navigator,
        pub caches: RoleCaches,
        pub slot: u16,
        pub slot_ticks: u32,
        pub pos: GridPos,
        pub team: Team,
        pub cargo: u8,
        next_id: u32,
    }

    impl Fixture {
        pub fn new(pos: GridPos) -> Self {
            let config = NavConfig::default();
            Self {
                world: TestWorld::new(),
                index: SpatialIndex::new(config.cell_size),
                rng: AgentRng::new(config.seed, AgentId(0)),
                nav: NavState::new(&config),
                memory: AgentMemory::default(),
                navigator: Navigator::new(32, 32, &config),
                caches: RoleCaches::new(&config),
                slot: NO_OPTION,
                slot_ticks: 0,
                pos,
                team: Team(0),
                cargo: 0,
                next_id: 100,
                config,
            }
        }

        /// Place an entity in both the world map and the spatial index.
        pub fn add_entity(&mut self, pos: GridPos, kind: EntityKind, team: Team) -> EntityId {
            let id = EntityId(self.next_id);
            self.next_id += 1;
            self.world.entities.insert(pos, EntityRef { id, kind, team, cargo: 0 });
            self.index.insert(id, pos);
            id
        }

        pub fn remove_entity(&mut self, pos: GridPos) {
            if let Some(e) = self.world.entities.remove(&pos) {
                self.index.remove(e.id);
            }
        }

        pub fn decide(&mut self, role: &Role, tick: u64) -> Action {
            let ctx = OptionCtx {
                agent: AgentId(0),
                tick: Tick(tick),
                pos: self.pos,
                team: self.team,
                cargo: self.cargo,
                world: &self.world,
                index: &self.index,
                config: &self.config,
            };
            let mut scratch = AgentScratch {
                rng: &mut self.rng,
                nav: &mut self.nav,
                memory: &mut self.memory,
                navigator: &mut self.navigator,
                caches: &mut self.caches,
            };
            OptionEngine.decide(
                role,
                ActiveSlot { option: &mut self.slot, ticks: &mut self.slot_ticks },
                &ctx,
                &mut scratch,
            )
        }
    }

    /// Assert `action` is a step that strictly reduces distance to `target`.
    pub fn assert_step_toward(action: Action, from: GridPos, target: GridPos) {
        match action {
            Action { verb: gm_behavior::Verb::Move, arg: gm_behavior::ActionArg::Dir(dir) } => {
                let dest = from.step(dir);
                assert!(
                    dest.chebyshev(target) < from.chebyshev(target),
                    "{action:?} does not close on {target}"
                );
            }
            other => panic!("expected a move toward {target}, got {other:?}"),
        }
    }
}

// ── RoleTable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use gm_core::{ResourceKind, RoleId};

    use crate::{RoleTable, gatherer, warrior};

    #[test]
    fn register_and_get() {
        let mut table = RoleTable::new();
        let g = table.register(gatherer(ResourceKind::Wood));
        let w = table.register(warrior());
        assert_eq!(g, RoleId(0));
        assert_eq!(w, RoleId(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(g).unwrap().len(), 5);
        assert_eq!(table.get(w).unwrap().len(), 4);
    }

    #[test]
    fn unknown_role_is_none() {
        let table = RoleTable::new();
        assert!(table.get(RoleId(0)).is_none());
        assert!(table.get(RoleId::INVALID).is_none());
    }
}

// ── Gatherer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gatherer {
    use gm_behavior::{Action, Verb};
    use gm_core::{BuildingKind, Direction, EntityKind, GridPos, ResourceKind, Team, Tick};

    use super::helpers::{Fixture, assert_step_toward};
    use crate::gatherer;

    const WOOD: EntityKind = EntityKind::Resource(ResourceKind::Wood);

    #[test]
    fn harvests_adjacent_resource_and_remembers_it() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.add_entity(GridPos::new(6, 5), WOOD, Team::NEUTRAL);
        let role = gatherer(ResourceKind::Wood);

        let action = fx.decide(&role, 0);
        assert_eq!(action, Action::use_adjacent(Direction::East));
        let (seen_pos, seen_at) = fx.memory.recall(ResourceKind::Wood).unwrap();
        assert_eq!(seen_pos, GridPos::new(6, 5));
        assert_eq!(seen_at, Tick(0));
    }

    #[test]
    fn deposits_into_adjacent_stockpile() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.cargo = 3;
        fx.add_entity(
            GridPos::new(6, 5),
            EntityKind::Building(BuildingKind::Stockpile),
            Team(0),
        );
        let action = fx.decide(&gatherer(ResourceKind::Wood), 0);
        assert_eq!(action, Action::give(Direction::East));
    }

    #[test]
    fn hauls_toward_distant_stockpile() {
        let mut fx = Fixture::new(GridPos::new(2, 2));
        fx.cargo = 1;
        let stockpile = GridPos::new(20, 2);
        fx.add_entity(stockpile, EntityKind::Building(BuildingKind::Stockpile), Team(0));
        let action = fx.decide(&gatherer(ResourceKind::Wood), 0);
        assert_step_toward(action, fx.pos, stockpile);
    }

    #[test]
    fn enemy_stockpile_is_not_a_deposit_target() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.cargo = 1;
        fx.add_entity(
            GridPos::new(6, 5),
            EntityKind::Building(BuildingKind::Stockpile),
            Team(1),
        );
        let action = fx.decide(&gatherer(ResourceKind::Wood), 0);
        assert_ne!(action, Action::give(Direction::East));
    }

    #[test]
    fn seeks_remembered_location_first() {
        let mut fx = Fixture::new(GridPos::new(0, 0));
        fx.memory.record(ResourceKind::Wood, GridPos::new(8, 0), Tick(0));
        // No wood in the index at all: only the memory can drive this.
        let action = fx.decide(&gatherer(ResourceKind::Wood), 1);
        assert_step_toward(action, fx.pos, GridPos::new(8, 0));
    }

    #[test]
    fn arrival_at_empty_remembered_tile_forgets_it() {
        let mut fx = Fixture::new(GridPos::new(1, 0));
        fx.memory.record(ResourceKind::Wood, GridPos::new(2, 0), Tick(0));
        let action = fx.decide(&gatherer(ResourceKind::Wood), 1);
        assert_eq!(action, Action::idle(), "nothing there and nothing else to seek");
        assert_eq!(fx.memory.recall(ResourceKind::Wood), None);
    }

    #[test]
    fn evade_preempts_seeking() {
        let mut fx = Fixture::new(GridPos::new(10, 10));
        fx.add_entity(GridPos::new(20, 10), WOOD, Team::NEUTRAL);
        let role = gatherer(ResourceKind::Wood);

        assert_step_toward(fx.decide(&role, 0), fx.pos, GridPos::new(20, 10));

        // A hostile closes to within the evade radius.
        fx.add_entity(GridPos::new(12, 10), EntityKind::Agent, Team(1));
        let action = fx.decide(&role, 1);
        assert_eq!(fx.slot, 0, "evade is the top-priority option");
        match action {
            Action { verb: Verb::Move, arg: gm_behavior::ActionArg::Dir(dir) } => {
                let dest = fx.pos.step(dir);
                assert!(
                    dest.chebyshev(GridPos::new(12, 10)) > fx.pos.chebyshev(GridPos::new(12, 10)),
                    "evade must open distance"
                );
            }
            other => panic!("expected an evading step, got {other:?}"),
        }
    }

    #[test]
    fn idles_through_wander_on_blank_world() {
        let mut fx = Fixture::new(GridPos::new(16, 16));
        let role = gatherer(ResourceKind::Wood);
        for t in 0..10u64 {
            let action = fx.decide(&role, t);
            assert!(
                matches!(action.verb, Verb::Move | Verb::Idle),
                "wander only moves or stands: {action:?}"
            );
        }
    }
}

// ── Warrior ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod warrior {
    use gm_behavior::Action;
    use gm_core::{BuildingKind, Direction, EntityKind, GridPos, Team};

    use super::helpers::{Fixture, assert_step_toward};
    use crate::warrior;
    use crate::warrior::PATROL_RADIUS;

    #[test]
    fn attacks_adjacent_hostile() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.add_entity(GridPos::new(6, 6), EntityKind::Agent, Team(1));
        let action = fx.decide(&warrior(), 0);
        assert_eq!(action, Action::attack(Direction::SouthEast));
    }

    #[test]
    fn friendly_agents_are_not_attacked() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.add_entity(GridPos::new(6, 5), EntityKind::Agent, Team(0));
        let action = fx.decide(&warrior(), 0);
        assert_ne!(action, Action::attack(Direction::East));
    }

    #[test]
    fn engages_hostile_within_aggro_radius() {
        let mut fx = Fixture::new(GridPos::new(2, 2));
        let enemy = GridPos::new(10, 2);
        fx.add_entity(enemy, EntityKind::Agent, Team(1));
        let action = fx.decide(&warrior(), 0);
        assert_step_toward(action, fx.pos, enemy);
    }

    #[test]
    fn fight_ends_when_target_dies() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        let enemy = GridPos::new(6, 5);
        fx.add_entity(enemy, EntityKind::Agent, Team(1));
        let role = warrior();
        assert_eq!(fx.decide(&role, 0), Action::attack(Direction::East));

        // Executor removes the dead enemy before the next decision.
        fx.remove_entity(enemy);
        let action = fx.decide(&role, 1);
        assert_ne!(action, Action::attack(Direction::East));
    }

    #[test]
    fn returns_to_camp_when_out_of_patrol_range() {
        let mut fx = Fixture::new(GridPos::new(2, 2));
        let camp = GridPos::new(2 + PATROL_RADIUS + 10, 2);
        fx.add_entity(camp, EntityKind::Building(BuildingKind::Camp), Team(0));
        let action = fx.decide(&warrior(), 0);
        assert_step_toward(action, fx.pos, camp);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use gm_behavior::{Action, Verb};
    use gm_core::{BuildingKind, Direction, EntityKind, GridPos, Team};

    use super::helpers::{Fixture, assert_step_toward};
    use crate::builder;
    use crate::builder::SITE_BUILD_INDEX;

    #[test]
    fn builds_adjacent_site() {
        let mut fx = Fixture::new(GridPos::new(5, 5));
        fx.add_entity(GridPos::new(5, 6), EntityKind::Building(BuildingKind::Site), Team(0));
        let action = fx.decide(&builder(), 0);
        assert_eq!(action, Action::build(Direction::South));
    }

    #[test]
    fn walks_to_distant_site() {
        let mut fx = Fixture::new(GridPos::new(2, 2));
        let site = GridPos::new(18, 2);
        fx.add_entity(site, EntityKind::Building(BuildingKind::Site), Team(0));
        let action = fx.decide(&builder(), 0);
        assert_step_toward(action, fx.pos, site);
    }

    #[test]
    fn plants_a_site_when_carrying_materials() {
        let mut fx = Fixture::new(GridPos::new(16, 16));
        fx.cargo = 2;
        let action = fx.decide(&builder(), 0);
        assert_eq!(action, Action::plant_structure(SITE_BUILD_INDEX));
    }

    #[test]
    fn no_materials_means_no_planting() {
        let mut fx = Fixture::new(GridPos::new(16, 16));
        let action = fx.decide(&builder(), 0);
        assert_ne!(action.verb, Verb::PlantStructure);
    }
}
