use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::entity::EntityId;
use crate::models::state::State;

/// An entity under workflow management: the opaque payload, its identity,
/// where it currently stands, and the append-only history of transition
/// attempts. Mutated only by a committed transition handler run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub(crate) entity: Value,

    pub(crate) entity_id: EntityId,

    pub(crate) started: bool,

    pub(crate) current_step: Option<Box<str>>,

    pub(crate) history: Vec<State>,
}

impl Item {
    pub fn new(entity_id: EntityId, entity: Value) -> Self {
        Item {
            entity,
            entity_id,
            started: false,
            current_step: None,
            history: Vec::new(),
        }
    }

    /// Rebuilds an item from persisted parts, as a state repository does
    /// when an entity re-enters the engine.
    pub fn restore(
        entity_id: EntityId,
        entity: Value,
        current_step: Option<String>,
        history: Vec<State>,
    ) -> Self {
        let started = current_step.is_some();
        Item {
            entity,
            entity_id,
            started,
            current_step: current_step.map(String::into_boxed_str),
            history,
        }
    }

    pub fn entity(&self) -> &Value {
        &self.entity
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    pub fn history(&self) -> &[State] {
        &self.history
    }

    pub fn last_state(&self) -> Option<&State> {
        self.history.last()
    }

    /// Applies a committed successful state: advances the current step,
    /// replaces the entity payload with the post-action one, and appends
    /// the state to the history.
    pub(crate) fn apply(&mut self, state: State, entity: Value) {
        self.entity = entity;
        self.current_step = state.step_to().map(|s| s.to_string().into_boxed_str());
        self.started = true;
        self.history.push(state);
    }
}
