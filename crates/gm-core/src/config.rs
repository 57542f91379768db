//! Runtime configuration for the decision core.
//!
//! Every tunable the navigation and behavior layers consume lives here with a
//! documented default — nothing is an embedded constant.  Applications load
//! this from TOML/JSON (with the `serde` feature) or construct it in code and
//! hand it to the engine builder.

use crate::{CoreError, CoreResult};

/// All runtime parameters consumed by the decision core.
///
/// The defaults are tuned for maps of roughly 100×100 tiles with up to ~1000
/// agents; see each field for what moving it trades off.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Hard cap on A* node expansions per search.  The planner's only
    /// bounded-cost guarantee — bounded by node count, not wall clock.
    /// Default: 250.
    pub node_budget: usize,

    /// Maximum waypoints in a reconstructed path.  Longer reconstructions are
    /// truncated at the goal end (the start-adjacent prefix is kept).
    /// Default: 48.
    pub path_cap: usize,

    /// Maximum goal candidates per search: the literal target plus its
    /// passable neighbors, used when the target cell itself is blocked.
    /// Default: 5.
    pub goal_candidates: usize,

    /// Below this Chebyshev distance (and while not stuck) movement uses the
    /// O(8) greedy mover instead of the planner.  Default: 5.
    pub greedy_range: i32,

    /// Positions remembered per agent for oscillation detection.  Default: 6.
    pub stuck_window: usize,

    /// An agent is flagged stuck when the distinct positions in a full
    /// window fall to this count or below.  Default: 2.
    pub stuck_distinct_max: usize,

    /// Ticks after which a stuck flag clears even if the agent has not left
    /// its recent position set.  Default: 8.
    pub stuck_relief_ticks: u64,

    /// Side length of one spatial-index cell in tiles.  Smaller cells mean
    /// more buckets but fewer entities scanned per query.  Default: 8.
    pub cell_size: i32,

    /// Role-cache entries older than this many ticks are recomputed.
    /// Default: 1 (valid within the current tick only).
    pub cache_max_age_ticks: u64,

    /// A cached position is also discarded when the querying agent has moved
    /// further than this from the origin of the original search.  Default: 12.
    pub cache_max_drift: i32,

    /// Master RNG seed.  The same seed always produces identical decisions.
    pub seed: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            node_budget:        250,
            path_cap:           48,
            goal_candidates:    5,
            greedy_range:       5,
            stuck_window:       6,
            stuck_distinct_max: 2,
            stuck_relief_ticks: 8,
            cell_size:          8,
            cache_max_age_ticks: 1,
            cache_max_drift:    12,
            seed:               0,
        }
    }
}

impl NavConfig {
    /// Reject configurations the core cannot operate under.
    pub fn validate(&self) -> CoreResult<()> {
        if self.cell_size <= 0 {
            return Err(CoreError::Config(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.node_budget == 0 {
            return Err(CoreError::Config("node_budget must be nonzero".into()));
        }
        if self.path_cap < 2 {
            return Err(CoreError::Config(format!(
                "path_cap must hold at least start and one step, got {}",
                self.path_cap
            )));
        }
        if self.stuck_window == 0 {
            return Err(CoreError::Config("stuck_window must be nonzero".into()));
        }
        if self.goal_candidates == 0 {
            return Err(CoreError::Config("goal_candidates must be nonzero".into()));
        }
        Ok(())
    }
}
