use core_kernel::CoreError;

#[test]
fn validation_keeps_message() {
    let error = CoreError::validation("page_size must be greater than zero");
    assert_eq!(
        error,
        CoreError::Validation("page_size must be greater than zero".into())
    );
    assert_eq!(error.field(), None);
}

#[test]
fn zero_and_positive_values_pass() {
    assert!(CoreError::require_not_negative("id", 0).is_ok());
    assert!(CoreError::require_not_negative("id", 12).is_ok());
}

#[test]
fn negative_value_names_field_and_value() {
    let error = CoreError::require_not_negative("tree_id", -1).unwrap_err();

    assert_eq!(error.field(), Some("tree_id"));
    assert_eq!(error.to_string(), "tree_id must not be negative (got -1)");
}
