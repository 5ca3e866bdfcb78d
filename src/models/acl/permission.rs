use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::errors::WorkflowError;

const SEPARATOR: char = ':';

/// A permission gating transitions of one workflow. Its identity is the
/// composed `workflow:permission-id` string; two permissions are equal
/// exactly when those strings are.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Permission {
    workflow: Box<str>,
    id: Box<str>,
}

impl Permission {
    pub fn new(workflow: impl Into<String>, id: impl Into<String>) -> Self {
        Permission {
            workflow: workflow.into().into_boxed_str(),
            id: id.into().into_boxed_str(),
        }
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.workflow, SEPARATOR, self.id)
    }
}

impl FromStr for Permission {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workflow, id) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| WorkflowError::InvalidPermission(s.to_string()))?;
        if workflow.is_empty() || id.is_empty() {
            return Err(WorkflowError::InvalidPermission(s.to_string()));
        }
        Ok(Permission::new(workflow, id))
    }
}
