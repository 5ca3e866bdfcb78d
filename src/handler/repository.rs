use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::models::context::Context;
use crate::models::entity::EntityId;
use crate::models::error_collection::ErrorCollection;
use crate::models::item::Item;
use crate::models::state::State;

/// Entity persistence, keyed by provider. The engine never touches storage
/// itself; it only drives these contracts around the transaction boundary.
pub trait EntityRepository {
    fn get(&self, id: &EntityId) -> Option<Value>;

    fn save(&mut self, id: &EntityId, entity: &Value);
}

/// Resolves the entity repository for a provider name.
pub trait EntityManager {
    fn repository(&self, provider: &str) -> Option<Rc<RefCell<dyn EntityRepository>>>;
}

/// State-history persistence. Called by the handler on commit only.
pub trait StateRepository {
    fn save(&mut self, item: &Item, state: &State);

    fn find(&self, entity_id: &EntityId) -> Vec<State>;
}

/// UI binding for transitions that require input. `validate` reports
/// whether the input is acceptable and writes the form values into the
/// attempt context.
pub trait Form {
    fn prepare(&mut self, item: &Item, context: &Context);

    fn validate(&mut self, context: &mut Context) -> bool;

    fn error_collection(&self) -> &ErrorCollection;
}

/// Straightforward provider-name registry of entity repositories.
#[derive(Default)]
pub struct ProviderMap {
    repositories: BTreeMap<String, Rc<RefCell<dyn EntityRepository>>>,
}

impl ProviderMap {
    pub fn new() -> Self {
        ProviderMap::default()
    }

    pub fn register(
        &mut self,
        provider: impl Into<String>,
        repository: Rc<RefCell<dyn EntityRepository>>,
    ) {
        self.repositories.insert(provider.into(), repository);
    }
}

impl EntityManager for ProviderMap {
    fn repository(&self, provider: &str) -> Option<Rc<RefCell<dyn EntityRepository>>> {
        self.repositories.get(provider).cloned()
    }
}
