use serde::{Deserialize, Serialize};

use crate::models::acl::Permission;

/// A named set of permissions scoped to one workflow. Two roles are the
/// same role when their full names (`workflow::name`) match.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Role {
    name: Box<str>,

    workflow: Box<str>,

    permissions: Vec<Permission>,
}

impl Role {
    pub fn new(workflow: impl Into<String>, name: impl Into<String>) -> Self {
        Role {
            name: name.into().into_boxed_str(),
            workflow: workflow.into().into_boxed_str(),
            permissions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn full_name(&self) -> String {
        format!("{}::{}", self.workflow, self.name)
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Idempotent: adding a permission the role already holds is a no-op.
    pub fn add_permission(&mut self, permission: Permission) {
        if !self.has_permission(&permission) {
            self.permissions.push(permission);
        }
    }

    /// Idempotent: removing an absent permission is a no-op.
    pub fn remove_permission(&mut self, permission: &Permission) {
        self.permissions.retain(|p| p != permission);
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.full_name() == other.full_name()
    }
}

impl Eq for Role {}
