//! `gm-behavior` — option framework and action encoding for the `gridmind`
//! core.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`action`] | `Verb`, `ActionArg`, `Action`, `EncodedAction`             |
//! | [`option`] | `OptionDef`, `Role`, `OptionCtx`, `AgentScratch`           |
//! | [`engine`] | `OptionEngine` — the per-tick selection algorithm          |
//! | [`cache`]  | `RoleCaches` — tick-stamped, drift-checked memoization     |
//!
//! # Failure policy
//!
//! Nothing in this crate returns an error.  Ineligible, terminated, or
//! invalid outcomes all collapse to the idle action; the worst case for any
//! one agent is standing still for one tick.

pub mod action;
pub mod cache;
pub mod engine;
pub mod option;


pub use action::{Action, ActionArg, EncodedAction, Verb};
pub use cache::{CacheKey, RoleCaches};
pub use engine::{ActiveSlot, OptionEngine};
pub use option::{ActFn, AgentScratch, CanStartFn, OptionCtx, OptionDef, Role, ShouldTerminateFn};
