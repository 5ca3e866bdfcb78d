use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::entity::EntityId;
use crate::models::state::State;

/// Event names published by the event-dispatching listener and
/// transaction handler variants.
pub mod events {
    pub const BUILD_FORM: &str = "workflow.build_form";
    pub const VALIDATE: &str = "workflow.validate";
    pub const PRE_TRANSIT: &str = "workflow.pre_transit";
    pub const POST_TRANSIT: &str = "workflow.post_transit";
    pub const TRANSACTION_BEGIN: &str = "workflow.transaction.begin";
    pub const TRANSACTION_COMMIT: &str = "workflow.transaction.commit";
    pub const TRANSACTION_ROLLBACK: &str = "workflow.transaction.rollback";
}

/// Payload handed to subscribers. Passed mutably so a validate subscriber
/// can veto by clearing `valid`; the listener reads the flag back after
/// publishing.
#[derive(Debug, Serialize, Clone)]
pub struct TransitionEvent {
    id: Uuid,

    workflow: String,

    entity_id: EntityId,

    transition: Option<String>,

    context: Value,

    state: Option<State>,

    pub valid: bool,
}

impl TransitionEvent {
    pub fn new(
        workflow: String,
        entity_id: EntityId,
        transition: Option<String>,
        context: Value,
        state: Option<State>,
    ) -> Self {
        TransitionEvent {
            id: Uuid::new_v4(),
            workflow,
            entity_id,
            transition,
            context,
            state,
            valid: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn transition(&self) -> Option<&str> {
        self.transition.as_deref()
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }
}

/// Generic event-publish capability. Subscribers run synchronously on the
/// caller's thread; the engine reads veto flags back from the payload.
pub trait EventPublisher {
    fn publish(&self, event: &str, payload: &mut TransitionEvent);
}
