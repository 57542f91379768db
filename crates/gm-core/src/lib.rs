//! `gm-core` — foundational types for the `gridmind` decision core.
//!
//! This crate is a dependency of every other `gm-*` crate.  It intentionally
//! has no `gm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `EntityId`, `RoleId`                         |
//! | [`grid`]   | `GridPos`, `Direction`, `CellCoord`, Chebyshev metric   |
//! | [`time`]   | `Tick`                                                  |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`config`] | `NavConfig` — every runtime tunable with its default    |
//! | [`world`]  | `WorldView` trait and the entity vocabulary behind it   |
//! | [`error`]  | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types. |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::NavConfig;
pub use error::{CoreError, CoreResult};
pub use grid::{CellCoord, Direction, GridPos};
pub use ids::{AgentId, EntityId, RoleId};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
pub use world::{BuildingKind, EntityKind, EntityRef, ResourceKind, Team, WorldView};
