use thiserror::Error;

/// Fatal, programmer-level errors: a named graph element does not exist or
/// an identifier cannot be parsed. Business-rule rejections never surface
/// here; those accumulate in an [`ErrorCollection`](crate::models::error_collection::ErrorCollection)
/// and are reported through the resulting `State`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),
    #[error("Step not found: {0}")]
    StepNotFound(String),
    #[error("Transition not found: {0}")]
    TransitionNotFound(String),
    #[error("Invalid entity id: {0}")]
    InvalidEntityId(String),
    #[error("Invalid permission: {0}")]
    InvalidPermission(String),
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),
    #[error("Error index out of range: {index} (count {count})")]
    ErrorIndexOutOfRange { index: usize, count: usize },
    #[error("Action '{action}' failed: {message}")]
    ActionFailure { action: String, message: String },
}

impl WorkflowError {
    pub fn action_failure(action: impl Into<String>, message: impl Into<String>) -> Self {
        WorkflowError::ActionFailure {
            action: action.into(),
            message: message.into(),
        }
    }
}
