//! The role registry.

use gm_behavior::Role;
use gm_core::RoleId;

/// Maps [`RoleId`] to its option list.
///
/// Roles are registered once at engine setup (or whenever external
/// recombination logic derives a new one) and shared from then on — the
/// table hands out cheap `Arc` clones, never copies of the option data.
#[derive(Default)]
pub struct RoleTable {
    roles: Vec<Role>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self { roles: Vec::new() }
    }

    /// Register a role and return its ID.
    pub fn register(&mut self, role: Role) -> RoleId {
        let id = RoleId(self.roles.len() as u16);
        self.roles.push(role);
        id
    }

    /// The option list for `id`, if registered.
    #[inline]
    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
