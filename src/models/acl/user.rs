use serde::{Deserialize, Serialize};

use crate::models::acl::{Permission, Role};

/// A user is just a set of roles; permission queries delegate to them.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct User {
    roles: Vec<Role>,
}

impl User {
    pub fn new() -> Self {
        User::default()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn assign_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    pub fn reject_role(&mut self, role: &Role) {
        self.roles.retain(|r| r != role);
    }

    /// Granted iff any assigned role grants it.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.roles.iter().any(|r| r.has_permission(permission))
    }

    /// Granted iff every listed permission is granted by some assigned
    /// role; the granting role may differ per permission.
    pub fn has_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}
