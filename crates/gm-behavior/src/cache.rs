//! Tick-stamped, drift-checked position memoization.
//!
//! Role logic asks the same spatial questions many times ("where is the
//! nearest stockpile?").  Answers are memoized per agent, trusted only while
//! two staleness checks hold: the stamp is recent enough, and the agent has
//! not wandered too far from where the original search ran.  The cache is an
//! explicit context object passed into the hooks that use it — there is no
//! hidden global state behind a query function.

use gm_core::{BuildingKind, GridPos, NavConfig, ResourceKind, Tick};
use rustc_hash::FxHashMap;

/// What a cached position answers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CacheKey {
    NearestBuilding(BuildingKind),
    NearestResource(ResourceKind),
    NearestEnemy,
}

#[derive(Copy, Clone, Debug)]
struct CacheEntry {
    pos: GridPos,
    /// Where the agent stood when the answer was computed.
    origin: GridPos,
    stamped: Tick,
}

/// Per-agent memo cache for role queries.
///
/// An entry is served only while `now - stamped < max_age` **and** the
/// querying agent is within `max_drift` of the entry's search origin;
/// otherwise `compute` runs again.  A compute that finds nothing also drops
/// any stale entry, so a vanished target cannot be served twice.
#[derive(Clone, Debug)]
pub struct RoleCaches {
    entries: FxHashMap<CacheKey, CacheEntry>,
    max_age: u64,
    max_drift: i32,
}

impl RoleCaches {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            entries: FxHashMap::default(),
            max_age: config.cache_max_age_ticks,
            max_drift: config.cache_max_drift,
        }
    }

    /// Serve `key` from cache or recompute via `compute`.
    pub fn lookup(
        &mut self,
        key: CacheKey,
        now: Tick,
        origin: GridPos,
        compute: impl FnOnce() -> Option<GridPos>,
    ) -> Option<GridPos> {
        if let Some(entry) = self.entries.get(&key) {
            let fresh = now.since(entry.stamped) < self.max_age;
            let near = origin.chebyshev(entry.origin) <= self.max_drift;
            if fresh && near {
                return Some(entry.pos);
            }
        }
        match compute() {
            Some(pos) => {
                self.entries.insert(key, CacheEntry { pos, origin, stamped: now });
                Some(pos)
            }
            None => {
                self.entries.remove(&key);
                None
            }
        }
    }

    /// Drop one entry (the target was re-validated and found gone).
    pub fn invalidate(&mut self, key: CacheKey) {
        self.entries.remove(&key);
    }

    /// Drop everything (respawn).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
