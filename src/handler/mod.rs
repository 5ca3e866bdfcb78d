pub mod event;
pub mod factory;
pub mod listener;
pub mod repository;
pub mod transaction;
pub mod transition_handler;

pub use self::event::{EventPublisher, TransitionEvent};
pub use self::factory::{HandlerFactory, TransitionHandlerFactory};
pub use self::listener::{EventListener, Listener, NoopListener};
pub use self::repository::{EntityManager, EntityRepository, Form, ProviderMap, StateRepository};
pub use self::transaction::{
    DelegatingTransactionHandler, EventTransactionHandler, NoopTransactionHandler,
    TransactionHandler,
};
pub use self::transition_handler::{HandlerPhase, TransitionHandler};
