use serde_json::Value;

/// Binary comparison operators usable in guard conditions.
///
/// `Equal`/`NotEqual` compare loosely (numeric and boolean coercion),
/// `Identical`/`NotIdentical` require the exact same JSON type and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Identical,
    NotEqual,
    NotIdentical,
    GreaterThan,
    LessThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl Comparison {
    /// Resolves an operator symbol. Unknown symbols yield `None`; guard
    /// evaluation treats that as a false condition, never an error.
    pub fn from_symbol(symbol: &str) -> Option<Comparison> {
        match symbol {
            "==" => Some(Comparison::Equal),
            "===" => Some(Comparison::Identical),
            "!=" => Some(Comparison::NotEqual),
            "!==" => Some(Comparison::NotIdentical),
            ">" => Some(Comparison::GreaterThan),
            "<" => Some(Comparison::LessThan),
            "<=" => Some(Comparison::LessThanOrEqual),
            ">=" => Some(Comparison::GreaterThanOrEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::Identical => "===",
            Comparison::NotEqual => "!=",
            Comparison::NotIdentical => "!==",
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
            Comparison::LessThanOrEqual => "<=",
            Comparison::GreaterThanOrEqual => ">=",
        }
    }

    pub fn compare(&self, left: &Value, right: &Value) -> bool {
        match self {
            Comparison::Equal => loose_eq(left, right),
            Comparison::Identical => left == right,
            Comparison::NotEqual => !loose_eq(left, right),
            Comparison::NotIdentical => left != right,
            Comparison::GreaterThan => ordering(left, right).map_or(false, |o| o.is_gt()),
            Comparison::LessThan => ordering(left, right).map_or(false, |o| o.is_lt()),
            Comparison::LessThanOrEqual => ordering(left, right).map_or(false, |o| o.is_le()),
            Comparison::GreaterThanOrEqual => ordering(left, right).map_or(false, |o| o.is_ge()),
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn ordering(left: &Value, right: &Value) -> Option<std::cmp::Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => {
            let a = as_number(left)?;
            let b = as_number(right)?;
            a.partial_cmp(&b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_table_round_trip() {
        for symbol in ["==", "===", "!=", "!==", ">", "<", "<=", ">="] {
            let op = Comparison::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert_eq!(Comparison::from_symbol("<>"), None);
        assert_eq!(Comparison::from_symbol("in"), None);
    }

    #[test]
    fn test_loose_vs_strict_equality() {
        assert!(Comparison::Equal.compare(&json!(1), &json!("1")));
        assert!(Comparison::Equal.compare(&json!(1.0), &json!(1)));
        assert!(Comparison::Equal.compare(&json!(true), &json!(1)));
        assert!(!Comparison::Identical.compare(&json!(1), &json!("1")));
        assert!(Comparison::Identical.compare(&json!("a"), &json!("a")));
        assert!(Comparison::NotIdentical.compare(&json!(0), &json!(false)));
        assert!(!Comparison::NotEqual.compare(&json!(0), &json!(false)));
    }

    #[test]
    fn test_ordering_operators() {
        assert!(Comparison::GreaterThan.compare(&json!(3), &json!(2)));
        assert!(Comparison::LessThanOrEqual.compare(&json!(2), &json!(2)));
        assert!(Comparison::GreaterThanOrEqual.compare(&json!("b"), &json!("a")));
        assert!(Comparison::LessThan.compare(&json!("10"), &json!(20)));
        // Non-ordered types never satisfy an ordering operator.
        assert!(!Comparison::GreaterThan.compare(&json!(null), &json!(1)));
        assert!(!Comparison::LessThan.compare(&json!({"a": 1}), &json!(2)));
    }
}
