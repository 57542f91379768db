//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use gm_agent::AgentStoreBuilder;
//! use gm_core::NavConfig;
//!
//! let config = NavConfig::default();
//! let (store, rngs) = AgentStoreBuilder::new(1_000, &config).build();
//!
//! assert_eq!(store.count, 1_000);
//! assert_eq!(rngs.len(),  1_000);
//!
//! // Slots start Uninitialized; spawn agents into them afterwards.
//! ```

use gm_core::NavConfig;

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// All arrays are pre-allocated at construction time so spawning is a set of
/// indexed assignments, never a push.
pub struct AgentStoreBuilder {
    count: usize,
    config: NavConfig,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agent slots.
    ///
    /// The config supplies the RNG seed and the navigation-state dimensions
    /// (stuck window size etc.) baked into each slot.
    pub fn new(count: usize, config: &NavConfig) -> Self {
        Self { count, config: config.clone() }
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// All SoA arrays are allocated and filled with sentinel values; every
    /// slot starts `Uninitialized`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let store = AgentStore::new(self.count, &self.config);
        let rngs = AgentRngs::new(self.count, self.config.seed);
        (store, rngs)
    }
}
