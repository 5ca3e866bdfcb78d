use serde::{Deserialize, Serialize};
use serde_json::Value;
use sonyflake::Sonyflake;
use time::OffsetDateTime;

use crate::models::error_collection::ErrorCollection;

/// Immutable record of one transition attempt's outcome. Appended to an
/// item's history by the transition handler, and only on commit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct State {
    #[serde(rename = "id")]
    id: u64,

    transition: Box<str>,

    step_to: Option<Box<str>>,

    success: bool,

    errors: ErrorCollection,

    snapshot: Option<Value>,

    #[serde(with = "time::serde::iso8601")]
    timestamp: OffsetDateTime,
}

impl State {
    pub fn new(
        transition: String,
        step_to: Option<String>,
        success: bool,
        errors: ErrorCollection,
        snapshot: Option<Value>,
    ) -> Self {
        let sf = Sonyflake::new().unwrap();
        let id = sf.next_id().unwrap();
        State {
            id,
            transition: transition.into_boxed_str(),
            step_to: step_to.map(String::into_boxed_str),
            success,
            errors,
            snapshot,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn transition(&self) -> &str {
        &self.transition
    }

    pub fn step_to(&self) -> Option<&str> {
        self.step_to.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    /// Entity payload as it stood after the attempt's actions ran;
    /// only present on successful states.
    pub fn snapshot(&self) -> Option<&Value> {
        self.snapshot.as_ref()
    }

    pub fn timestamp(&self) -> &OffsetDateTime {
        &self.timestamp
    }
}
