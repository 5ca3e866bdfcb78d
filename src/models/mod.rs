pub mod acl;
pub mod comparison;
pub mod condition;
pub mod context;
pub mod entity;
pub mod error_collection;
pub mod errors;
pub mod item;
pub mod state;
pub mod step;
pub mod transition;
pub mod workflow;
