use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::errors::WorkflowError;

const SEPARATOR: &str = "::";

/// Identity of a domain entity under workflow management: the provider that
/// owns it plus its numeric identifier. The canonical string form is
/// `provider::id`; two ids are equal exactly when their canonical forms are.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    provider: Box<str>,
    identifier: u64,
}

impl EntityId {
    pub fn new(provider: impl Into<String>, identifier: u64) -> Self {
        EntityId {
            provider: provider.into().into_boxed_str(),
            identifier,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn identifier(&self) -> u64 {
        self.identifier
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.provider, SEPARATOR, self.identifier)
    }
}

impl FromStr for EntityId {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, identifier) = s
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| WorkflowError::InvalidEntityId(s.to_string()))?;
        if provider.is_empty() {
            return Err(WorkflowError::InvalidEntityId(s.to_string()));
        }
        let identifier = identifier
            .parse::<u64>()
            .map_err(|_| WorkflowError::InvalidEntityId(s.to_string()))?;
        Ok(EntityId::new(provider, identifier))
    }
}
