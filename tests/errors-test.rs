use serde_json::json;
use workflow_core::models::error_collection::ErrorCollection;
use workflow_core::models::errors::WorkflowError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_error_appends_in_order() {
        let mut errors = ErrorCollection::new();
        assert!(!errors.has_errors());
        assert_eq!(errors.count_errors(), 0);

        errors.add_error("First error", vec![], None);
        errors.add_error(
            "Value %value% is invalid",
            vec![("%value%".to_string(), json!(42))],
            None,
        );
        errors.add_error("Third error", vec![], None);

        assert!(errors.has_errors());
        assert_eq!(errors.count_errors(), 3);
        assert_eq!(errors.get_error(0).unwrap().template(), "First error");
        assert_eq!(
            errors.get_error(1).unwrap().template(),
            "Value %value% is invalid"
        );
        assert_eq!(errors.get_error(2).unwrap().template(), "Third error");
    }

    #[test]
    fn test_get_error_out_of_range() {
        let mut errors = ErrorCollection::new();
        errors.add_error("Only entry", vec![], None);

        assert!(errors.get_error(0).is_ok());
        assert_eq!(
            errors.get_error(1),
            Err(WorkflowError::ErrorIndexOutOfRange { index: 1, count: 1 })
        );
        assert_eq!(
            errors.get_error(7),
            Err(WorkflowError::ErrorIndexOutOfRange { index: 7, count: 1 })
        );
    }

    #[test]
    fn test_add_errors_preserves_both_orders() {
        let mut errors = ErrorCollection::new();
        errors.add_error("Existing one", vec![], None);
        errors.add_error("Existing two", vec![], None);

        let mut merged = ErrorCollection::new();
        merged.add_error("Merged one", vec![], None);
        merged.add_error("Merged two", vec![], None);

        errors.add_errors(merged);

        assert_eq!(errors.count_errors(), 4);
        assert_eq!(errors.get_error(0).unwrap().template(), "Existing one");
        assert_eq!(errors.get_error(1).unwrap().template(), "Existing two");
        assert_eq!(errors.get_error(2).unwrap().template(), "Merged one");
        assert_eq!(errors.get_error(3).unwrap().template(), "Merged two");
    }

    #[test]
    fn test_flatten_expands_nested_collection() {
        let mut nested = ErrorCollection::new();
        nested.add_error(
            "Field %field% is required",
            vec![("%field%".to_string(), json!("amount"))],
            None,
        );

        let mut errors = ErrorCollection::new();
        errors.add_error("Plain one", vec![], None);
        errors.add_error("Plain two", vec![], None);
        errors.add_error("", vec![], Some(nested));

        let flat = errors.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].0, "Plain one");
        assert_eq!(flat[1].0, "Plain two");
        assert_eq!(flat[2].0, "Field %field% is required");
        assert_eq!(flat[2].1[0], ("%field%".to_string(), json!("amount")));
    }

    #[test]
    fn test_flatten_recurses_deeply() {
        let mut inner = ErrorCollection::new();
        inner.add_error("Deepest", vec![], None);

        let mut middle = ErrorCollection::new();
        middle.add_error("Middle", vec![], None);
        middle.add_error("", vec![], Some(inner));

        let mut errors = ErrorCollection::new();
        errors.add_error("Top", vec![], None);
        errors.add_error("", vec![], Some(middle));

        let flat = errors.flatten();
        let templates: Vec<&str> = flat.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(templates, vec!["Top", "Middle", "Deepest"]);
    }
}
