use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::errors::WorkflowError;

/// One structured validation message: a template, its ordered parameters,
/// and optionally a nested collection (per-field errors under an aggregate).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ErrorEntry {
    template: Box<str>,

    parameters: Vec<(String, Value)>,

    nested: Option<ErrorCollection>,
}

impl ErrorEntry {
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    pub fn nested(&self) -> Option<&ErrorCollection> {
        self.nested.as_ref()
    }
}

/// Ordered, append-only collection of validation messages gathered during a
/// transition attempt. Entries are never replaced or reordered; merging a
/// sub-collection preserves both orders.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ErrorCollection {
    entries: Vec<ErrorEntry>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        ErrorCollection::default()
    }

    pub fn add_error(
        &mut self,
        template: impl Into<String>,
        parameters: Vec<(String, Value)>,
        nested: Option<ErrorCollection>,
    ) {
        self.entries.push(ErrorEntry {
            template: template.into().into_boxed_str(),
            parameters,
            nested,
        });
    }

    /// Appends every entry of `other`, preserving its order. Existing
    /// entries are untouched.
    pub fn add_errors(&mut self, other: ErrorCollection) {
        self.entries.extend(other.entries);
    }

    pub fn count_errors(&self) -> usize {
        self.entries.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn get_error(&self, index: usize) -> Result<&ErrorEntry, WorkflowError> {
        self.entries
            .get(index)
            .ok_or(WorkflowError::ErrorIndexOutOfRange {
                index,
                count: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Recursively expands the collection into a flat ordered list of
    /// (template, parameters) pairs for rendering. An entry carrying a
    /// nested collection is expanded into the nested entries in place.
    pub fn flatten(&self) -> Vec<(String, Vec<(String, Value)>)> {
        let mut flat = Vec::new();
        for entry in &self.entries {
            match &entry.nested {
                Some(nested) => flat.extend(nested.flatten()),
                None => flat.push((entry.template.to_string(), entry.parameters.clone())),
            }
        }
        flat
    }
}
