use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::handler::listener::Listener;
use crate::handler::repository::{EntityRepository, Form, StateRepository};
use crate::handler::transaction::TransactionHandler;
use crate::models::context::Context;
use crate::models::error_collection::ErrorCollection;
use crate::models::errors::WorkflowError;
use crate::models::item::Item;
use crate::models::state::State;
use crate::models::transition::Transition;
use crate::models::workflow::Workflow;

/// Where a handler stands in driving one transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPhase {
    Built,
    FormPrepared,
    Validated { valid: bool },
    Transitioned { success: bool },
}

/// Orchestrates a single transition attempt: resolve the transition on the
/// graph, drive form building and validation, run the guarded execution
/// inside the injected transaction boundary, and notify the listener at
/// each fixed point.
///
/// A handler is single-use and single-threaded; retrying means creating a
/// fresh handler and driving it from the start.
pub struct TransitionHandler {
    item: Item,
    workflow: Rc<Workflow>,
    transition_name: String,
    provider: String,
    context: Context,
    form: Rc<RefCell<dyn Form>>,
    listener: Box<dyn Listener>,
    transaction: Rc<RefCell<dyn TransactionHandler>>,
    entity_repository: Rc<RefCell<dyn EntityRepository>>,
    state_repository: Rc<RefCell<dyn StateRepository>>,
    phase: HandlerPhase,
}

impl TransitionHandler {
    pub fn new(
        item: Item,
        workflow: Rc<Workflow>,
        transition_name: String,
        provider: String,
        form: Rc<RefCell<dyn Form>>,
        listener: Box<dyn Listener>,
        transaction: Rc<RefCell<dyn TransactionHandler>>,
        entity_repository: Rc<RefCell<dyn EntityRepository>>,
        state_repository: Rc<RefCell<dyn StateRepository>>,
    ) -> Self {
        TransitionHandler {
            item,
            workflow,
            transition_name,
            provider,
            context: Context::new(),
            form,
            listener,
            transaction,
            entity_repository,
            state_repository,
            phase: HandlerPhase::Built,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn into_item(self) -> Item {
        self.item
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn phase(&self) -> HandlerPhase {
        self.phase
    }

    /// Resolves which transition this attempt runs. Unstarted items always
    /// take the workflow's start transition with no membership check;
    /// started items must name a transition the current step allows.
    fn resolve<'w>(&self, workflow: &'w Workflow) -> Result<&'w Transition, WorkflowError> {
        if !self.item.started() {
            return workflow.start_transition();
        }
        let transition = workflow.get_transition(&self.transition_name)?;
        let step_name = self
            .item
            .current_step()
            .ok_or_else(|| WorkflowError::StepNotFound(String::new()))?;
        let step = workflow.get_step(step_name)?;
        if !step.is_transition_allowed(&self.transition_name) {
            warn!(
                step = %step_name,
                transition = %self.transition_name,
                "Transition not allowed from current step"
            );
            return Err(WorkflowError::TransitionNotFound(
                self.transition_name.clone(),
            ));
        }
        Ok(transition)
    }

    /// Lets the form reflect the item and entity state, then gives the
    /// listener a chance to reshape it.
    pub fn prepare_form(&mut self) {
        let workflow = Rc::clone(&self.workflow);
        let form = Rc::clone(&self.form);
        let mut form = form.borrow_mut();
        form.prepare(&self.item, &self.context);
        self.listener.on_build_form(
            &mut *form,
            &workflow,
            &self.item,
            &mut self.context,
            &self.transition_name,
        );
        self.phase = HandlerPhase::FormPrepared;
    }

    /// Validates the attempt's input. Transitions without required input
    /// default to valid; the listener's returned flag is authoritative
    /// either way.
    pub fn validate(&mut self) -> Result<bool, WorkflowError> {
        if self.phase == HandlerPhase::Built {
            self.prepare_form();
        }
        let workflow = Rc::clone(&self.workflow);
        let transition = self.resolve(&workflow)?;
        let input_required = transition.input_required();

        let form = Rc::clone(&self.form);
        let mut form = form.borrow_mut();
        let valid = if input_required {
            form.validate(&mut self.context)
        } else {
            true
        };
        let valid = self.listener.on_validate(
            &mut *form,
            valid,
            &workflow,
            &self.item,
            &mut self.context,
            &self.transition_name,
        );
        debug!(
            transition = %self.transition_name,
            input_required,
            valid,
            "Validation resolved"
        );
        self.phase = HandlerPhase::Validated { valid };
        Ok(valid)
    }

    /// Executes the transition attempt end to end. Phases the caller has
    /// not driven yet (form building, validation) run first; the listener's
    /// post-transit hook always fires last, success or not.
    ///
    /// Business rejections come back as a `success=false` state after a
    /// rollback; `Err` is reserved for fatal lookup and action failures.
    #[instrument(skip(self), fields(
        workflow = %self.workflow.name(),
        entity = %self.item.entity_id(),
        transition = %self.transition_name,
        attempt = %Uuid::new_v4(),
    ))]
    pub fn execute(&mut self) -> Result<State, WorkflowError> {
        if self.phase == HandlerPhase::Built {
            self.prepare_form();
        }
        if self.phase == HandlerPhase::FormPrepared {
            self.validate()?;
        }
        let valid = match self.phase {
            HandlerPhase::Validated { valid } => valid,
            _ => true,
        };

        let workflow = Rc::clone(&self.workflow);
        let transition = self.resolve(&workflow)?;

        if !valid {
            return Ok(self.reject_invalid_input(&workflow, transition));
        }

        self.listener.on_pre_transit(
            &workflow,
            &self.item,
            &mut self.context,
            &self.transition_name,
        );

        self.transaction.borrow_mut().begin();
        debug!("Transaction started");

        let mut errors = ErrorCollection::new();
        let state = match transition.transit(&self.item, &mut self.context, &mut errors) {
            Ok(state) => state,
            Err(e) => {
                self.transaction.borrow_mut().rollback();
                debug!(error = %e, "Transaction rolled back after action failure");
                return Err(e);
            }
        };

        if errors.has_errors() || !state.success() {
            self.transaction.borrow_mut().rollback();
            debug!(
                error_count = errors.count_errors(),
                "Transaction rolled back, item unchanged"
            );
        } else if let Err(e) = self.persist(&state) {
            self.transaction.borrow_mut().rollback();
            debug!(error = %e, "Transaction rolled back after persistence failure");
            return Err(e);
        } else {
            self.transaction.borrow_mut().commit();
            info!(
                step = state.step_to().unwrap_or_default(),
                history_len = self.item.history().len(),
                "Transition committed"
            );
        }

        self.listener
            .on_post_transit(&workflow, &self.item, &mut self.context, &state);
        self.phase = HandlerPhase::Transitioned {
            success: state.success(),
        };
        Ok(state)
    }

    /// Invalid input never reaches the guard or the transaction: the
    /// attempt ends as a failed state carrying the form's errors, the item
    /// untouched, with only the post-transit hook fired.
    fn reject_invalid_input(&mut self, workflow: &Workflow, transition: &Transition) -> State {
        let mut errors = ErrorCollection::new();
        errors.add_errors(self.form.borrow().error_collection().clone());
        debug!(
            error_count = errors.count_errors(),
            "Input validation failed, attempt rejected"
        );
        let state = State::new(
            transition.name().to_string(),
            self.item.current_step().map(str::to_string),
            false,
            errors,
            None,
        );
        self.listener
            .on_post_transit(workflow, &self.item, &mut self.context, &state);
        self.phase = HandlerPhase::Transitioned { success: false };
        state
    }

    /// Commit path: the target step must exist, then the entity and the
    /// state go to their repositories and the item advances.
    fn persist(&mut self, state: &State) -> Result<(), WorkflowError> {
        let target = state
            .step_to()
            .ok_or_else(|| WorkflowError::StepNotFound(String::new()))?;
        self.workflow.get_step(target)?;

        let entity = state
            .snapshot()
            .cloned()
            .unwrap_or_else(|| self.item.entity().clone());
        self.entity_repository
            .borrow_mut()
            .save(self.item.entity_id(), &entity);
        self.state_repository
            .borrow_mut()
            .save(&self.item, state);
        self.item.apply(state.clone(), entity);
        Ok(())
    }
}
