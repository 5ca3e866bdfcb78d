use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::handler::event::EventPublisher;
use crate::handler::listener::{EventListener, Listener, NoopListener};
use crate::handler::repository::{EntityManager, Form, StateRepository};
use crate::handler::transaction::TransactionHandler;
use crate::handler::transition_handler::TransitionHandler;
use crate::models::errors::WorkflowError;
use crate::models::item::Item;
use crate::models::workflow::Workflow;

/// Builds a single-use transition handler for one attempt.
pub trait TransitionHandlerFactory {
    fn create_transition_handler(
        &self,
        item: Item,
        workflow: Rc<Workflow>,
        transition_name: String,
        provider: String,
        state_repository: Rc<RefCell<dyn StateRepository>>,
    ) -> Result<TransitionHandler, WorkflowError>;
}

/// Default factory: resolves the entity repository by provider name and
/// wires either the pass-through listener or, when an event publisher is
/// configured, the event-dispatching one.
pub struct HandlerFactory {
    entity_manager: Rc<dyn EntityManager>,
    form: Rc<RefCell<dyn Form>>,
    transaction: Rc<RefCell<dyn TransactionHandler>>,
    publisher: Option<Rc<dyn EventPublisher>>,
}

impl HandlerFactory {
    pub fn new(
        entity_manager: Rc<dyn EntityManager>,
        form: Rc<RefCell<dyn Form>>,
        transaction: Rc<RefCell<dyn TransactionHandler>>,
    ) -> Self {
        HandlerFactory {
            entity_manager,
            form,
            transaction,
            publisher: None,
        }
    }

    /// Switches created handlers to the event-dispatching listener.
    pub fn with_publisher(mut self, publisher: Rc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }
}

impl TransitionHandlerFactory for HandlerFactory {
    fn create_transition_handler(
        &self,
        item: Item,
        workflow: Rc<Workflow>,
        transition_name: String,
        provider: String,
        state_repository: Rc<RefCell<dyn StateRepository>>,
    ) -> Result<TransitionHandler, WorkflowError> {
        let entity_repository = self
            .entity_manager
            .repository(&provider)
            .ok_or_else(|| WorkflowError::ProviderNotFound(provider.clone()))?;

        let listener: Box<dyn Listener> = match &self.publisher {
            Some(publisher) => Box::new(EventListener::new(Rc::clone(publisher))),
            None => Box::new(NoopListener),
        };

        debug!(
            workflow = %workflow.name(),
            transition = %transition_name,
            provider = %provider,
            "Creating transition handler"
        );

        Ok(TransitionHandler::new(
            item,
            workflow,
            transition_name,
            provider,
            Rc::clone(&self.form),
            listener,
            Rc::clone(&self.transaction),
            entity_repository,
            state_repository,
        ))
    }
}
