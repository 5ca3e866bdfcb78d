use serde::{Deserialize, Serialize};

/// A named node in a workflow graph. A step knows which outgoing
/// transitions may run while an item stands on it; the start transition is
/// exempt from that check.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Step {
    name: Box<str>,

    allowed_transitions: Vec<String>,

    is_final: bool,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Step {
            name: name.into().into_boxed_str(),
            allowed_transitions: Vec::new(),
            is_final: false,
        }
    }

    pub fn allow(mut self, transition: impl Into<String>) -> Self {
        let transition = transition.into();
        if !self.allowed_transitions.contains(&transition) {
            self.allowed_transitions.push(transition);
        }
        self
    }

    pub fn finalize(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allowed_transitions(&self) -> &[String] {
        &self.allowed_transitions
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_transition_allowed(&self, transition: &str) -> bool {
        self.allowed_transitions.iter().any(|t| t == transition)
    }
}
