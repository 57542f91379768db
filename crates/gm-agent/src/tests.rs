//! Unit tests for gm-agent.

#[cfg(test)]
mod memory {
    use gm_core::{GridPos, ResourceKind, Tick};

    use crate::AgentMemory;

    #[test]
    fn record_and_recall() {
        let mut mem = AgentMemory::default();
        assert_eq!(mem.recall(ResourceKind::Wood), None);
        mem.record(ResourceKind::Wood, GridPos::new(4, 7), Tick(12));
        assert_eq!(mem.recall(ResourceKind::Wood), Some((GridPos::new(4, 7), Tick(12))));
        // Other kinds are untouched.
        assert_eq!(mem.recall(ResourceKind::Stone), None);
    }

    #[test]
    fn record_overwrites() {
        let mut mem = AgentMemory::default();
        mem.record(ResourceKind::Food, GridPos::new(1, 1), Tick(1));
        mem.record(ResourceKind::Food, GridPos::new(9, 9), Tick(5));
        assert_eq!(mem.recall(ResourceKind::Food), Some((GridPos::new(9, 9), Tick(5))));
    }

    #[test]
    fn forget_is_per_kind() {
        let mut mem = AgentMemory::default();
        mem.record(ResourceKind::Wood, GridPos::new(2, 2), Tick(3));
        mem.record(ResourceKind::Water, GridPos::new(3, 3), Tick(3));
        mem.forget(ResourceKind::Wood);
        assert_eq!(mem.recall(ResourceKind::Wood), None);
        assert!(mem.recall(ResourceKind::Water).is_some());
    }

    #[test]
    fn clear_wipes_everything() {
        let mut mem = AgentMemory::default();
        for kind in ResourceKind::ALL {
            mem.record(kind, GridPos::new(5, 5), Tick(9));
        }
        mem.clear();
        for kind in ResourceKind::ALL {
            assert_eq!(mem.recall(kind), None);
        }
    }
}

#[cfg(test)]
mod builder {
    use gm_core::NavConfig;

    use crate::{AgentPhase, AgentStoreBuilder, NO_OPTION};

    #[test]
    fn correct_count() {
        let (store, rngs) = AgentStoreBuilder::new(500, &NavConfig::default()).build();
        assert_eq!(store.count, 500);
        assert_eq!(rngs.len(), 500);
    }

    #[test]
    fn zero_agents() {
        let (store, rngs) = AgentStoreBuilder::new(0, &NavConfig::default()).build();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn slots_start_uninitialized() {
        use gm_core::RoleId;
        let (store, _) = AgentStoreBuilder::new(3, &NavConfig::default()).build();
        assert_eq!(store.phase[0], AgentPhase::Uninitialized);
        assert_eq!(store.role[0], RoleId::INVALID);
        assert_eq!(store.active_option[0], NO_OPTION);
    }
}

#[cfg(test)]
mod lifecycle {
    use gm_core::{AgentId, GridPos, NavConfig, ResourceKind, RoleId, Team, Tick};

    use crate::{AgentPhase, AgentStoreBuilder, NO_OPTION};

    #[test]
    fn spawn_marks_ready() {
        let (mut store, _) = AgentStoreBuilder::new(4, &NavConfig::default()).build();
        let a = AgentId(2);
        store.spawn(a, GridPos::new(7, 3), RoleId(1), Team(0));
        assert!(store.is_alive(a));
        assert_eq!(store.pos[2], GridPos::new(7, 3));
        assert_eq!(store.role[2], RoleId(1));
        assert_eq!(store.team[2], Team(0));
        // Neighbors untouched.
        assert_eq!(store.phase[1], AgentPhase::Uninitialized);
    }

    #[test]
    fn kill_wipes_behavioral_state_but_keeps_role() {
        let (mut store, _) = AgentStoreBuilder::new(2, &NavConfig::default()).build();
        let a = AgentId(0);
        store.spawn(a, GridPos::new(1, 1), RoleId(3), Team(1));
        store.active_option[0] = 2;
        store.option_ticks[0] = 17;
        store.memory[0].record(ResourceKind::Wood, GridPos::new(8, 8), Tick(4));

        store.kill(a);
        assert!(!store.is_alive(a));
        assert_eq!(store.phase[0], AgentPhase::Terminated);
        assert_eq!(store.active_option[0], NO_OPTION);
        assert_eq!(store.option_ticks[0], 0);
        assert_eq!(store.memory[0].recall(ResourceKind::Wood), None);
        // Role and team persist for respawn.
        assert_eq!(store.role[0], RoleId(3));
        assert_eq!(store.team[0], Team(1));
    }

    #[test]
    fn respawn_reuses_slot() {
        let (mut store, _) = AgentStoreBuilder::new(1, &NavConfig::default()).build();
        let a = AgentId(0);
        store.spawn(a, GridPos::new(0, 0), RoleId(2), Team(0));
        store.kill(a);
        store.respawn(a, GridPos::new(9, 9));
        assert!(store.is_alive(a));
        assert_eq!(store.pos[0], GridPos::new(9, 9));
        assert_eq!(store.role[0], RoleId(2));
    }

    #[test]
    fn agent_ids_iterator() {
        let (store, _) = AgentStoreBuilder::new(4, &NavConfig::default()).build();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3)]);
    }
}

#[cfg(test)]
mod rngs {
    use gm_core::{AgentId, NavConfig};

    use crate::AgentStoreBuilder;

    fn config_with_seed(seed: u64) -> NavConfig {
        NavConfig { seed, ..NavConfig::default() }
    }

    #[test]
    fn per_agent_determinism() {
        let (_, mut rngs1) = AgentStoreBuilder::new(10, &config_with_seed(999)).build();
        let (_, mut rngs2) = AgentStoreBuilder::new(10, &config_with_seed(999)).build();
        for i in 0..10u32 {
            let a: f32 = rngs1.get_mut(AgentId(i)).random();
            let b: f32 = rngs2.get_mut(AgentId(i)).random();
            assert_eq!(a, b, "agent {i} RNG should be deterministic");
        }
    }

    #[test]
    fn different_seeds_differ() {
        let (_, mut rngs_a) = AgentStoreBuilder::new(1, &config_with_seed(1)).build();
        let (_, mut rngs_b) = AgentStoreBuilder::new(1, &config_with_seed(2)).build();
        let a: u64 = rngs_a.get_mut(AgentId(0)).random();
        let b: u64 = rngs_b.get_mut(AgentId(0)).random();
        assert_ne!(a, b);
    }

    #[test]
    fn adjacent_agents_differ() {
        let (_, mut rngs) = AgentStoreBuilder::new(2, &config_with_seed(0)).build();
        let a: u64 = rngs.get_mut(AgentId(0)).random();
        let b: u64 = rngs.get_mut(AgentId(1)).random();
        assert_ne!(a, b);
    }
}
