//! `gm-roles` — role registry and built-in option libraries for the
//! `gridmind` core.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`table`]    | `RoleTable` — `RoleId` → option-list registry         |
//! | [`gatherer`] | evade → deposit → harvest → seek → wander             |
//! | [`warrior`]  | fight → engage → patrol → wander                      |
//! | [`builder`]  | evade → construct → go-to-site → plant → wander       |
//!
//! A role here is nothing but data (`Arc<[OptionDef]>`); applications are
//! free to register their own lists, splice options from these libraries
//! into new orders, or generate roles at runtime.

pub mod builder;
pub mod common;
pub mod gatherer;
pub mod table;
pub mod warrior;

#[cfg(test)]
mod tests;

pub use builder::builder;
pub use gatherer::gatherer;
pub use table::RoleTable;
pub use warrior::warrior;
