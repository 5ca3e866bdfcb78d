use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered key-value bag carried through a transition attempt: form input,
/// values derived by actions, anything a listener wants downstream hooks to
/// see. Setting an existing key replaces the value in place, so iteration
/// order is insertion order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Context {
    entries: Vec<(String, Value)>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Snapshot as a JSON object, used for event payloads.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (k, v) in &self.entries {
            map.insert(k.clone(), v.clone());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut context = Context::new();
        context.set("first", json!(1));
        context.set("second", json!(2));
        context.set("third", json!(3));

        let keys: Vec<&str> = context.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
        assert_eq!(context.len(), 3);
        assert!(!context.is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut context = Context::new();
        context.set("first", json!(1));
        context.set("second", json!(2));
        context.set("third", json!(3));
        context.set("second", json!(20));

        // The key keeps its original position; only the value changes.
        let entries: Vec<(&str, &Value)> = context.iter().collect();
        assert_eq!(entries[1], ("second", &json!(20)));
        assert_eq!(context.len(), 3);
        assert_eq!(context.get("second"), Some(&json!(20)));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut context = Context::new();
        assert!(context.is_empty());
        context.set("first", json!(1));
        context.set("second", json!(2));

        assert!(context.contains("first"));
        assert_eq!(context.remove("first"), Some(json!(1)));
        assert!(!context.contains("first"));
        assert_eq!(context.remove("first"), None);

        let keys: Vec<&str> = context.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["second"]);
        assert_eq!(context.len(), 1);
    }
}
