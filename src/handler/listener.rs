use std::rc::Rc;

use tracing::debug;

use crate::handler::event::{events, EventPublisher, TransitionEvent};
use crate::handler::repository::Form;
use crate::models::context::Context;
use crate::models::item::Item;
use crate::models::state::State;
use crate::models::workflow::Workflow;

/// Hook interface notified at the four fixed points around a transition
/// attempt. The value returned by `on_validate` is authoritative: a
/// listener may override the validity the form produced.
pub trait Listener {
    fn on_build_form(
        &self,
        _form: &mut dyn Form,
        _workflow: &Workflow,
        _item: &Item,
        _context: &mut Context,
        _transition: &str,
    ) {
    }

    fn on_validate(
        &self,
        _form: &mut dyn Form,
        valid: bool,
        _workflow: &Workflow,
        _item: &Item,
        _context: &mut Context,
        _transition: &str,
    ) -> bool {
        valid
    }

    fn on_pre_transit(
        &self,
        _workflow: &Workflow,
        _item: &Item,
        _context: &mut Context,
        _transition: &str,
    ) {
    }

    fn on_post_transit(
        &self,
        _workflow: &Workflow,
        _item: &Item,
        _context: &mut Context,
        _state: &State,
    ) {
    }
}

/// Pass-through listener: every hook is a no-op and validity is returned
/// unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl Listener for NoopListener {}

/// Listener that turns each hook into a published event carrying the
/// workflow, item identity, and context. Validate subscribers veto through
/// the event's `valid` flag, which is read back and returned.
pub struct EventListener {
    publisher: Rc<dyn EventPublisher>,
}

impl EventListener {
    pub fn new(publisher: Rc<dyn EventPublisher>) -> Self {
        EventListener { publisher }
    }

    fn event(
        &self,
        workflow: &Workflow,
        item: &Item,
        context: &Context,
        transition: Option<&str>,
        state: Option<&State>,
    ) -> TransitionEvent {
        TransitionEvent::new(
            workflow.name().to_string(),
            item.entity_id().clone(),
            transition.map(str::to_string),
            context.to_value(),
            state.cloned(),
        )
    }
}

impl Listener for EventListener {
    fn on_build_form(
        &self,
        _form: &mut dyn Form,
        workflow: &Workflow,
        item: &Item,
        context: &mut Context,
        transition: &str,
    ) {
        let mut event = self.event(workflow, item, context, Some(transition), None);
        self.publisher.publish(events::BUILD_FORM, &mut event);
    }

    fn on_validate(
        &self,
        _form: &mut dyn Form,
        valid: bool,
        workflow: &Workflow,
        item: &Item,
        context: &mut Context,
        transition: &str,
    ) -> bool {
        let mut event = self.event(workflow, item, context, Some(transition), None);
        event.valid = valid;
        self.publisher.publish(events::VALIDATE, &mut event);
        if event.valid != valid {
            debug!(
                transition = %transition,
                valid = event.valid,
                "Validity overridden by event subscriber"
            );
        }
        event.valid
    }

    fn on_pre_transit(
        &self,
        workflow: &Workflow,
        item: &Item,
        context: &mut Context,
        transition: &str,
    ) {
        let mut event = self.event(workflow, item, context, Some(transition), None);
        self.publisher.publish(events::PRE_TRANSIT, &mut event);
    }

    fn on_post_transit(
        &self,
        workflow: &Workflow,
        item: &Item,
        context: &mut Context,
        state: &State,
    ) {
        let mut event = self.event(workflow, item, context, None, Some(state));
        self.publisher.publish(events::POST_TRANSIT, &mut event);
    }
}
