use std::collections::BTreeMap;

use crate::models::errors::WorkflowError;
use crate::models::step::Step;
use crate::models::transition::Transition;

/// A named workflow graph: the owning arena for its steps and transitions.
/// Cross-references between graph elements are by name, resolved through
/// the workflow, never by back-pointer. Built once at configuration time
/// and read-only afterwards.
#[derive(Debug)]
pub struct Workflow {
    name: Box<str>,

    provider: Box<str>,

    steps: BTreeMap<String, Step>,

    transitions: BTreeMap<String, Transition>,

    start_transition: Box<str>,
}

impl Workflow {
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        start_transition: impl Into<String>,
    ) -> Self {
        Workflow {
            name: name.into().into_boxed_str(),
            provider: provider.into().into_boxed_str(),
            steps: BTreeMap::new(),
            transitions: BTreeMap::new(),
            start_transition: start_transition.into().into_boxed_str(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.insert(step.name().to_string(), step);
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions
            .insert(transition.name().to_string(), transition);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn start_transition_name(&self) -> &str {
        &self.start_transition
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    pub fn get_step(&self, name: &str) -> Result<&Step, WorkflowError> {
        self.steps
            .get(name)
            .ok_or_else(|| WorkflowError::StepNotFound(name.to_string()))
    }

    pub fn get_transition(&self, name: &str) -> Result<&Transition, WorkflowError> {
        self.transitions
            .get(name)
            .ok_or_else(|| WorkflowError::TransitionNotFound(name.to_string()))
    }

    pub fn start_transition(&self) -> Result<&Transition, WorkflowError> {
        self.get_transition(&self.start_transition)
    }

    /// Checks the graph invariants after configuration: every transition
    /// target and every step's allowed transition must exist.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        for transition in self.transitions.values() {
            self.get_step(transition.step_to())?;
        }
        for step in self.steps.values() {
            for name in step.allowed_transitions() {
                self.get_transition(name)?;
            }
        }
        self.start_transition()?;
        Ok(())
    }
}
