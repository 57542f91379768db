//! `gm-agent` — Structure-of-Arrays agent storage for the `gridmind` core.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs`, `AgentPhase`    |
//! | [`memory`]  | `AgentMemory` — last-seen resource sightings            |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)               |
//!
//! Positions stored here are mirrored into the spatial index by the engine;
//! nothing outside the engine should write `AgentStore::pos` directly.

pub mod builder;
pub mod memory;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use memory::AgentMemory;
pub use store::{AgentPhase, AgentRngs, AgentStore, NO_OPTION};
