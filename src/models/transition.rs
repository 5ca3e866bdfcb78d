use serde_json::Value;
use tracing::{debug, error};

use crate::models::condition::Condition;
use crate::models::context::Context;
use crate::models::error_collection::ErrorCollection;
use crate::models::errors::WorkflowError;
use crate::models::item::Item;
use crate::models::state::State;

/// A side effect run while a transition executes. Actions may mutate the
/// entity payload and the context, and report business-rule rejections by
/// appending to the error collection. `Err` is reserved for programmer
/// errors (missing required input), which abort the attempt outright.
pub trait Action {
    fn name(&self) -> &str;

    fn run(
        &self,
        entity: &mut Value,
        context: &mut Context,
        errors: &mut ErrorCollection,
    ) -> Result<(), WorkflowError>;
}

/// A named, guarded edge of a workflow graph. Immutable after
/// construction; owned by exactly one workflow and referenced by name.
pub struct Transition {
    name: Box<str>,

    step_to: Box<str>,

    conditions: Vec<Condition>,

    actions: Vec<Box<dyn Action>>,

    input_required: bool,
}

impl Transition {
    pub fn new(name: impl Into<String>, step_to: impl Into<String>) -> Self {
        Transition {
            name: name.into().into_boxed_str(),
            step_to: step_to.into().into_boxed_str(),
            conditions: Vec::new(),
            actions: Vec::new(),
            input_required: false,
        }
    }

    pub fn guard(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn action(mut self, action: Box<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn require_input(mut self) -> Self {
        self.input_required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_to(&self) -> &str {
        &self.step_to
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn input_required(&self) -> bool {
        self.input_required
    }

    /// Evaluates the guard conditions against the item's entity and the
    /// attempt context. No conditions means always allowed. Pure; called
    /// exactly once per transition attempt.
    pub fn is_allowed(&self, item: &Item, context: &Context) -> bool {
        self.conditions
            .iter()
            .all(|c| c.evaluate(item.entity(), context))
    }

    /// Executes one transition attempt against the item.
    ///
    /// The entity payload is cloned first; actions mutate the clone, so a
    /// failed attempt leaves the item's payload untouched. The resulting
    /// state carries the post-action payload as its snapshot on success.
    /// The state is not appended to the item here - that is the handler's
    /// job, gated on the transaction outcome.
    pub fn transit(
        &self,
        item: &Item,
        context: &mut Context,
        errors: &mut ErrorCollection,
    ) -> Result<State, WorkflowError> {
        if !self.is_allowed(item, context) {
            debug!(transition = %self.name, "Guard denied transition");
            errors.add_error(
                "Transition '%transition%' is not allowed",
                vec![(
                    "%transition%".to_string(),
                    Value::String(self.name.to_string()),
                )],
                None,
            );
            return Ok(State::new(
                self.name.to_string(),
                item.current_step().map(str::to_string),
                false,
                errors.clone(),
                None,
            ));
        }

        let mut entity = item.entity().clone();
        for action in &self.actions {
            debug!(transition = %self.name, action = %action.name(), "Running action");
            if let Err(e) = action.run(&mut entity, context, errors) {
                error!(
                    transition = %self.name,
                    action = %action.name(),
                    error = %e,
                    "Action failed"
                );
                return Err(e);
            }
        }

        let success = !errors.has_errors();
        let (step_to, snapshot) = if success {
            (Some(self.step_to.to_string()), Some(entity))
        } else {
            (item.current_step().map(str::to_string), None)
        };

        Ok(State::new(
            self.name.to_string(),
            step_to,
            success,
            errors.clone(),
            snapshot,
        ))
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .field("step_to", &self.step_to)
            .field("conditions", &self.conditions)
            .field("actions", &self.actions.len())
            .field("input_required", &self.input_required)
            .finish()
    }
}
