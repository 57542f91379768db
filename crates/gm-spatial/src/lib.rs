//! `gm-spatial` — cell-bucketed entity index with proximity queries.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`index`] | `SpatialIndex` — insert/remove/update membership bookkeeping |
//! | [`query`] | range and nearest queries, the sorted cell-offset table     |
//!
//! # Design notes
//!
//! Entities live in coarse square cells (`NavConfig::cell_size` tiles per
//! side).  Each cell holds a plain `Vec<EntityId>` bucket; a reverse map from
//! entity to `(position, cell, slot)` makes removal swap-with-last-and-pop,
//! so insert, remove and update are all O(1) amortized.
//!
//! Queries never fail: an empty result is the normal "nothing there" answer.
//! The index is a single-writer structure — all mutation happens at one
//! synchronization point per tick (the executor's position-apply pass).

pub mod index;
pub mod query;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use index::SpatialIndex;
