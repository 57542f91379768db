//! Fluent construction and validation for [`DecisionEngine`].

use gm_agent::AgentStoreBuilder;
use gm_core::{AgentId, CoreError, GridPos, NavConfig, RoleId, Team};
use gm_roles::RoleTable;

use crate::{DecisionEngine, EngineError, EngineResult};

/// Builder for [`DecisionEngine`].
///
/// The required inputs go into [`new`][Self::new]; everything else is
/// optional.  When `positions` is provided all agents spawn `Ready` at build
/// time (with per-agent roles and teams if given, role-less neutrals
/// otherwise); without it every slot starts `Uninitialized` and the caller
/// spawns agents through the engine doors.
///
/// Per-agent inputs must have exactly `agent_count` entries; `build` rejects
/// anything else with [`EngineError::AgentCountMismatch`].
pub struct EngineBuilder {
    config: NavConfig,
    width: i32,
    height: i32,
    agent_count: usize,
    roles: RoleTable,
    positions: Option<Vec<GridPos>>,
    agent_roles: Option<Vec<RoleId>>,
    teams: Option<Vec<Team>>,
}

impl EngineBuilder {
    pub fn new(config: NavConfig, width: i32, height: i32, agent_count: usize) -> Self {
        Self {
            config,
            width,
            height,
            agent_count,
            roles: RoleTable::default(),
            positions: None,
            agent_roles: None,
            teams: None,
        }
    }

    /// The role registry agents select options from.
    pub fn roles(mut self, roles: RoleTable) -> Self {
        self.roles = roles;
        self
    }

    /// Initial position per agent; spawns everyone at build time.
    pub fn positions(mut self, positions: Vec<GridPos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Role per agent (requires [`positions`][Self::positions]).
    pub fn agent_roles(mut self, agent_roles: Vec<RoleId>) -> Self {
        self.agent_roles = Some(agent_roles);
        self
    }

    /// Team per agent (requires [`positions`][Self::positions]).
    pub fn teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = Some(teams);
        self
    }

    pub fn build(self) -> EngineResult<DecisionEngine> {
        self.config.validate()?;
        if self.width <= 0 || self.height <= 0 {
            return Err(CoreError::Config(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            ))
            .into());
        }
        check_len(self.agent_count, self.positions.as_deref(), "positions")?;
        check_len(self.agent_count, self.agent_roles.as_deref(), "agent_roles")?;
        check_len(self.agent_count, self.teams.as_deref(), "teams")?;

        let (store, rngs) = AgentStoreBuilder::new(self.agent_count, &self.config).build();
        let mut engine =
            DecisionEngine::new(self.config, self.width, self.height, store, rngs, self.roles);

        if let Some(positions) = self.positions {
            let roles = self
                .agent_roles
                .unwrap_or_else(|| vec![RoleId::INVALID; positions.len()]);
            let teams = self
                .teams
                .unwrap_or_else(|| vec![Team::NEUTRAL; positions.len()]);
            for (i, &pos) in positions.iter().enumerate() {
                engine.spawn(AgentId(i as u32), pos, roles[i], teams[i]);
            }
        }

        Ok(engine)
    }
}

fn check_len<T>(expected: usize, input: Option<&[T]>, what: &'static str) -> EngineResult<()> {
    match input {
        Some(slice) if slice.len() != expected => Err(EngineError::AgentCountMismatch {
            expected,
            got: slice.len(),
            what,
        }),
        _ => Ok(()),
    }
}
