//! The `DecisionEngine` and its per-tick decision pass.

use gm_agent::{AgentPhase, AgentRngs, AgentStore};
use gm_behavior::{ActiveSlot, AgentScratch, EncodedAction, OptionCtx, OptionEngine, RoleCaches};
use gm_core::{AgentId, Direction, EntityId, GridPos, NavConfig, RoleId, Team, Tick, WorldView};
use gm_path::{Navigator, StuckDetector};
use gm_roles::RoleTable;
use gm_spatial::SpatialIndex;

use crate::{DecisionObserver, NoopObserver};

/// Runs one decision pass per tick over all agents.
///
/// The engine owns every piece of decision-side state — agent store, RNGs,
/// spatial index, navigator, role table, per-agent caches — and exposes a
/// small set of mutation doors.  The contract with the external executor:
///
/// - [`decide_tick`][Self::decide_tick] reads a frozen [`WorldView`] snapshot
///   and returns exactly one [`EncodedAction`] per agent slot.  It never
///   mutates world state.
/// - The executor applies the actions however it likes, then reports every
///   resulting position change back through [`set_position`][Self::set_position]
///   (and lifecycle changes through [`spawn`][Self::spawn] /
///   [`kill`][Self::kill] / [`respawn`][Self::respawn]).  These doors are the
///   only position writers, which is what keeps the store and the spatial
///   index coherent.
/// - Non-agent entities (resources, buildings) are mirrored into the index
///   via [`insert_entity`][Self::insert_entity] / [`remove_entity`][Self::remove_entity].
///
/// Agents occupy the low `EntityId` range `[0, agent_count)` in the index;
/// world entities must use ids at or above `agent_count`.
pub struct DecisionEngine {
    config: NavConfig,
    store: AgentStore,
    rngs: AgentRngs,
    index: SpatialIndex,
    navigator: Navigator,
    detector: StuckDetector,
    selector: OptionEngine,
    roles: RoleTable,
    /// Per-agent role-query caches, indexed by `AgentId`.
    caches: Vec<RoleCaches>,
    /// Last pass's output, one entry per agent slot.
    actions: Vec<EncodedAction>,
    tick: Tick,
}

impl DecisionEngine {
    pub(crate) fn new(
        config: NavConfig,
        width: i32,
        height: i32,
        store: AgentStore,
        rngs: AgentRngs,
        roles: RoleTable,
    ) -> Self {
        let count = store.count;
        Self {
            index: SpatialIndex::new(config.cell_size),
            navigator: Navigator::new(width, height, &config),
            detector: StuckDetector::new(&config),
            selector: OptionEngine,
            caches: (0..count).map(|_| RoleCaches::new(&config)).collect(),
            actions: vec![EncodedAction::IDLE; count],
            tick: Tick(0),
            config,
            store,
            rngs,
            roles,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Read-only agent state.  Mutation goes through the lifecycle doors.
    #[inline]
    pub fn store(&self) -> &AgentStore {
        &self.store
    }

    #[inline]
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    #[inline]
    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// The tick the next decision pass will run at.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// The last pass's output (all idle before the first pass).
    #[inline]
    pub fn actions(&self) -> &[EncodedAction] {
        &self.actions
    }

    /// The spatial-index id mirroring one agent.
    #[inline]
    pub fn agent_entity(agent: AgentId) -> EntityId {
        EntityId(agent.0)
    }

    // ── Decision pass ─────────────────────────────────────────────────────

    /// Run one decision pass without callbacks.
    pub fn decide_tick(&mut self, world: &dyn WorldView) -> &[EncodedAction] {
        self.decide_tick_with(world, &mut NoopObserver)
    }

    /// Run one decision pass against a frozen world snapshot.
    ///
    /// Agents are visited in ascending `AgentId` order; each live agent's
    /// position is recorded for oscillation detection, then its role's option
    /// list runs through the selector.  Dead, uninitialized, and role-less
    /// slots emit the idle encoding.  Advances the engine's tick.
    pub fn decide_tick_with<O: DecisionObserver>(
        &mut self,
        world: &dyn WorldView,
        observer: &mut O,
    ) -> &[EncodedAction] {
        let now = self.tick;
        observer.on_tick_start(now);

        let AgentStore {
            count,
            pos,
            team,
            role,
            phase,
            active_option,
            option_ticks,
            nav,
            memory,
            ..
        } = &mut self.store;

        let mut decided = 0usize;
        for i in 0..*count {
            let agent = AgentId(i as u32);
            if phase[i] != AgentPhase::Ready {
                self.actions[i] = EncodedAction::IDLE;
                continue;
            }

            let here = pos[i];
            let nav_i = &mut nav[i];
            self.detector
                .observe(&mut nav_i.ring, &mut nav_i.stuck, here, now);

            let Some(options) = self.roles.get(role[i]) else {
                self.actions[i] = EncodedAction::IDLE;
                continue;
            };

            // Cargo comes from the snapshot, like everything else the
            // hooks see.
            let cargo = world.entity_at(here).map_or(0, |e| e.cargo);
            let ctx = OptionCtx {
                agent,
                tick: now,
                pos: here,
                team: team[i],
                cargo,
                world,
                index: &self.index,
                config: &self.config,
            };
            let mut scratch = AgentScratch {
                rng: self.rngs.get_mut(agent),
                nav: nav_i,
                memory: &mut memory[i],
                navigator: &mut self.navigator,
                caches: &mut self.caches[i],
            };
            let slot = ActiveSlot {
                option: &mut active_option[i],
                ticks: &mut option_ticks[i],
            };

            let action = self.selector.decide(options, slot, &ctx, &mut scratch).encode();
            self.actions[i] = action;
            observer.on_agent_decided(now, agent, action);
            decided += 1;
        }

        observer.on_tick_end(now, decided);
        self.tick = now.offset(1);
        &self.actions
    }

    // ── Agent lifecycle / position doors ──────────────────────────────────
    //
    // Every store position write is paired with the matching index write
    // here, and nowhere else.

    /// Report an agent's new position after the executor moved it.
    pub fn set_position(&mut self, agent: AgentId, pos: GridPos) {
        self.store.pos[agent.index()] = pos;
        self.index.update(Self::agent_entity(agent), pos);
    }

    /// Turn an agent in place (applied from orient actions).
    pub fn set_facing(&mut self, agent: AgentId, dir: Direction) {
        self.store.facing[agent.index()] = dir;
    }

    /// Bring an agent slot to life at `pos`.
    pub fn spawn(&mut self, agent: AgentId, pos: GridPos, role: RoleId, team: Team) {
        self.store.spawn(agent, pos, role, team);
        self.caches[agent.index()].clear();
        self.index.insert(Self::agent_entity(agent), pos);
    }

    /// Mark an agent dead and drop it from the index.
    pub fn kill(&mut self, agent: AgentId) {
        self.store.kill(agent);
        self.caches[agent.index()].clear();
        self.index.remove(Self::agent_entity(agent));
    }

    /// Revive a dead agent at `pos` with its previous role and team.
    pub fn respawn(&mut self, agent: AgentId, pos: GridPos) {
        self.store.respawn(agent, pos);
        self.caches[agent.index()].clear();
        self.index.insert(Self::agent_entity(agent), pos);
    }

    // ── World-entity mirror doors ─────────────────────────────────────────

    /// Mirror a non-agent entity into the index.  `entity` must be at or
    /// above the agent id range.
    pub fn insert_entity(&mut self, entity: EntityId, pos: GridPos) {
        debug_assert!(entity.index() >= self.store.count, "id collides with an agent");
        self.index.insert(entity, pos);
    }

    /// Drop a non-agent entity from the index.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.index.remove(entity);
    }
}
