//! `gm-path` — bounded best-effort movement planning.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`scratch`]   | `SearchScratch` — generation-stamped reusable A* arrays   |
//! | [`planner`]   | `PathPlanner` — bounded A* over a passability oracle      |
//! | [`greedy`]    | `greedy_step` — O(8) single-step movement                 |
//! | [`stuck`]     | `PositionRing`, `StuckDetector` — oscillation detection   |
//! | [`navigator`] | `Navigator`, `NavState` — strategy selection + path reuse |
//!
//! # Design notes
//!
//! Nothing in this crate signals failure through errors.  The planner returns
//! a best-effort path — possibly empty — and the navigator returns
//! `Option<Direction>`, where `None` simply means "stand still this tick".
//! The node-expansion budget is the system's only bounded-cost guarantee.

pub mod greedy;
pub mod navigator;
pub mod planner;
pub mod scratch;
pub mod stuck;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use greedy::greedy_step;
pub use navigator::{NavState, Navigator};
pub use planner::PathPlanner;
pub use scratch::SearchScratch;
pub use stuck::{PositionRing, StuckDetector, StuckState};
