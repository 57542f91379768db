//! `gm-sim` — the decision engine tying the `gridmind` crates together.
//!
//! # One pass per tick
//!
//! ```text
//! loop {
//!   actions = engine.decide_tick(&world);   // frozen snapshot in, actions out
//!   executor applies the actions            // combat, transfer, movement...
//!   executor reports back:                  // set_position / kill / respawn,
//!     position + lifecycle changes          // insert_entity / remove_entity
//! }
//! ```
//!
//! The engine never mutates world state; the executor never writes agent
//! positions except through the engine's doors.  That split keeps the store
//! and the spatial index coherent and the decision pass order-independent.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`engine`]   | `DecisionEngine` — the pass, the lifecycle doors       |
//! | [`builder`]  | `EngineBuilder` — validated construction               |
//! | [`observer`] | `DecisionObserver` callbacks, `NoopObserver`           |
//! | [`world`]    | `GridWorld` — owned `WorldView` for demos and tests    |
//! | [`error`]    | `EngineError`, `EngineResult`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut roles = RoleTable::new();
//! let gatherer = roles.register(gm_roles::gatherer(ResourceKind::Wood));
//!
//! let mut engine = EngineBuilder::new(NavConfig::default(), 64, 64, 100)
//!     .roles(roles)
//!     .positions(starts)
//!     .agent_roles(vec![gatherer; 100])
//!     .teams(vec![Team(0); 100])
//!     .build()?;
//!
//! let actions = engine.decide_tick(&world);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::EngineBuilder;
pub use engine::DecisionEngine;
pub use error::{EngineError, EngineResult};
pub use observer::{DecisionObserver, NoopObserver};
pub use world::GridWorld;
