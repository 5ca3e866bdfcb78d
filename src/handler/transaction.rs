use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::handler::event::{events, EventPublisher, TransitionEvent};
use crate::models::entity::EntityId;

/// The begin/commit/rollback boundary around a transition attempt. Opaque
/// to the engine: what a transaction means (database session, outbox,
/// nothing at all) belongs to the injected implementation, including any
/// partial-commit recovery.
pub trait TransactionHandler {
    fn begin(&mut self);

    fn commit(&mut self);

    fn rollback(&mut self);
}

/// Handler without a backing transaction, for providers whose persistence
/// is atomic per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransactionHandler;

impl TransactionHandler for NoopTransactionHandler {
    fn begin(&mut self) {}

    fn commit(&mut self) {}

    fn rollback(&mut self) {}
}

/// Fans each call out to several child handlers, e.g. a database
/// transaction plus an event announcement. Children receive begin, commit,
/// and rollback in registration order.
#[derive(Default)]
pub struct DelegatingTransactionHandler {
    children: Vec<Rc<RefCell<dyn TransactionHandler>>>,
}

impl DelegatingTransactionHandler {
    pub fn new() -> Self {
        DelegatingTransactionHandler::default()
    }

    pub fn add_handler(&mut self, handler: Rc<RefCell<dyn TransactionHandler>>) {
        self.children.push(handler);
    }
}

impl TransactionHandler for DelegatingTransactionHandler {
    fn begin(&mut self) {
        for child in &self.children {
            child.borrow_mut().begin();
        }
    }

    fn commit(&mut self) {
        for child in &self.children {
            child.borrow_mut().commit();
        }
    }

    fn rollback(&mut self) {
        for child in &self.children {
            child.borrow_mut().rollback();
        }
    }
}

/// Announces the transaction boundary as published events, so external
/// systems can mirror the attempt's outcome.
pub struct EventTransactionHandler {
    publisher: Rc<dyn EventPublisher>,
    workflow: String,
    entity_id: EntityId,
}

impl EventTransactionHandler {
    pub fn new(publisher: Rc<dyn EventPublisher>, workflow: String, entity_id: EntityId) -> Self {
        EventTransactionHandler {
            publisher,
            workflow,
            entity_id,
        }
    }

    fn announce(&self, event: &str) {
        debug!(workflow = %self.workflow, event = %event, "Announcing transaction event");
        let mut payload = TransitionEvent::new(
            self.workflow.clone(),
            self.entity_id.clone(),
            None,
            Value::Null,
            None,
        );
        self.publisher.publish(event, &mut payload);
    }
}

impl TransactionHandler for EventTransactionHandler {
    fn begin(&mut self) {
        self.announce(events::TRANSACTION_BEGIN);
    }

    fn commit(&mut self) {
        self.announce(events::TRANSACTION_COMMIT);
    }

    fn rollback(&mut self) {
        self.announce(events::TRANSACTION_ROLLBACK);
    }
}
