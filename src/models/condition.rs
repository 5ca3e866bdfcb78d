use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::comparison::Comparison;
use crate::models::context::Context;

/// Guard condition tree attached to a transition.
///
/// A `Compare` leaf looks the property up in the transition context first
/// (exact key), then as a dotted path into the entity payload. The operator
/// is kept as its symbol so workflow definitions with an unknown operator
/// load fine and simply evaluate to false.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Condition {
    Compare {
        property: String,
        operator: String,
        value: Value,
    },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(property: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Condition::Compare {
            property: property.into(),
            operator: operator.into(),
            value,
        }
    }

    /// Evaluates the tree against the entity payload and the attempt
    /// context. Pure: no side effects on either.
    pub fn evaluate(&self, entity: &Value, context: &Context) -> bool {
        match self {
            Condition::Compare {
                property,
                operator,
                value,
            } => match Comparison::from_symbol(operator) {
                Some(op) => {
                    let actual = lookup(property, entity, context);
                    op.compare(&actual, value)
                }
                None => false,
            },
            Condition::All(children) => children.iter().all(|c| c.evaluate(entity, context)),
            Condition::Any(children) => children.iter().any(|c| c.evaluate(entity, context)),
            Condition::Not(child) => !child.evaluate(entity, context),
        }
    }
}

fn lookup(property: &str, entity: &Value, context: &Context) -> Value {
    if let Some(value) = context.get(property) {
        return value.clone();
    }
    let mut current = entity;
    for part in property.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_shadows_entity() {
        let entity = json!({"amount": 5});
        let mut context = Context::new();
        context.set("amount", json!(50));

        let condition = Condition::compare("amount", ">", json!(10));
        assert!(condition.evaluate(&entity, &context));
        assert!(!condition.evaluate(&entity, &Context::new()));
    }

    #[test]
    fn test_dotted_path_and_missing_property() {
        let entity = json!({"order": {"total": 120}});
        let context = Context::new();

        assert!(Condition::compare("order.total", ">=", json!(100)).evaluate(&entity, &context));
        // Missing properties resolve to null, so == null tests absence.
        assert!(Condition::compare("order.discount", "==", json!(null)).evaluate(&entity, &context));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        let entity = json!({"amount": 5});
        let condition = Condition::compare("amount", "<>", json!(5));
        assert!(!condition.evaluate(&entity, &Context::new()));
    }

    #[test]
    fn test_combinators() {
        let entity = json!({"amount": 5, "status": "open"});
        let context = Context::new();

        let both = Condition::All(vec![
            Condition::compare("amount", "<", json!(10)),
            Condition::compare("status", "===", json!("open")),
        ]);
        assert!(both.evaluate(&entity, &context));

        let either = Condition::Any(vec![
            Condition::compare("amount", ">", json!(10)),
            Condition::compare("status", "===", json!("open")),
        ]);
        assert!(either.evaluate(&entity, &context));

        assert!(!Condition::Not(Box::new(both)).evaluate(&entity, &context));
    }
}
