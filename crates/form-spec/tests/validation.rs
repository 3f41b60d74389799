use form_spec::{
    Field, FieldType, FieldValue, RuleKind, Scalar, ValidationRule, ValueMap, compile, validate,
};
use form_spec::{CondOperator, ConditionalRule, Diagnostic};

fn bare_field(id: &str, kind: FieldType) -> Field {
    Field {
        id: id.into(),
        kind,
        label: id.into(),
        placeholder: None,
        default_value: None,
        options: None,
        validations: Vec::new(),
        conditional_display: None,
        is_manually_hidden: None,
    }
}

#[test]
fn min_rule_rejects_below_bound() {
    let mut field = bare_field("age", FieldType::Number);
    field.validations.push(ValidationRule::new(
        RuleKind::Min,
        Some(Scalar::from(18i64)),
        "Must be 18+",
    ));
    let constraint = compile(&field);

    let failures = constraint.check(Some(&FieldValue::from(15i64)));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].rule, Some(RuleKind::Min));
    assert_eq!(failures[0].message, "Must be 18+");

    assert!(constraint.check(Some(&FieldValue::from(20i64))).is_empty());
    // Not required, so an absent value bypasses the bound entirely.
    assert!(constraint.check(None).is_empty());
}

#[test]
fn email_field_enforces_shape_and_required() {
    let mut field = bare_field("email", FieldType::Email);
    field
        .validations
        .push(ValidationRule::new(RuleKind::Required, None, "Required"));
    let constraint = compile(&field);

    let shape = constraint.check(Some(&FieldValue::from("not-an-email")));
    assert_eq!(shape.len(), 1);
    assert_eq!(shape[0].rule, None);

    let empty = constraint.check(Some(&FieldValue::from("")));
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].rule, Some(RuleKind::Required));
    assert_eq!(empty[0].message, "Required");

    assert!(constraint.check(Some(&FieldValue::from("a@b.com"))).is_empty());
}

#[test]
fn optional_field_bypasses_other_rules_when_empty() {
    let mut field = bare_field("nickname", FieldType::Text);
    field.validations.push(ValidationRule::new(
        RuleKind::MinLength,
        Some(Scalar::from(3i64)),
        "Too short",
    ));
    let constraint = compile(&field);

    assert!(constraint.check(None).is_empty());
    assert!(constraint.check(Some(&FieldValue::from(""))).is_empty());
    assert_eq!(constraint.check(Some(&FieldValue::from("ab"))).len(), 1);
}

#[test]
fn required_checkbox_must_be_checked() {
    let mut field = bare_field("terms", FieldType::Checkbox);
    field.validations.push(ValidationRule::new(
        RuleKind::Required,
        None,
        "You must accept",
    ));
    let constraint = compile(&field);

    let unchecked = constraint.check(Some(&FieldValue::from(false)));
    assert_eq!(unchecked.len(), 1);
    assert_eq!(unchecked[0].message, "You must accept");

    assert!(constraint.check(Some(&FieldValue::from(true))).is_empty());
}

#[test]
fn pattern_must_match_the_whole_value() {
    let mut field = bare_field("code", FieldType::Text);
    field.validations.push(ValidationRule::new(
        RuleKind::Pattern,
        Some(Scalar::from("[A-Z]{3}")),
        "Three capitals",
    ));
    let constraint = compile(&field);

    assert!(constraint.check(Some(&FieldValue::from("ABC"))).is_empty());
    assert_eq!(constraint.check(Some(&FieldValue::from("xABCx"))).len(), 1);
}

#[test]
fn invalid_pattern_fails_closed_with_diagnostic() {
    let mut field = bare_field("code", FieldType::Text);
    field.validations.push(ValidationRule::new(
        RuleKind::Pattern,
        Some(Scalar::from("(unclosed")),
        "Bad input",
    ));
    let constraint = compile(&field);

    assert_eq!(constraint.diagnostics().len(), 1);
    assert!(matches!(
        constraint.diagnostics()[0],
        Diagnostic::MalformedRuleOperand { .. }
    ));

    // The rule still rejects every candidate instead of crashing.
    let failures = constraint.check(Some(&FieldValue::from("anything")));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].rule, Some(RuleKind::Pattern));
    assert_eq!(failures[0].message, "Bad input");
}

#[test]
fn missing_numeric_operand_fails_closed() {
    let mut field = bare_field("age", FieldType::Number);
    field
        .validations
        .push(ValidationRule::new(RuleKind::Min, None, "Invalid"));
    let constraint = compile(&field);

    assert_eq!(constraint.diagnostics().len(), 1);
    assert_eq!(constraint.check(Some(&FieldValue::from(42i64))).len(), 1);
}

#[test]
fn incompatible_rule_is_ignored() {
    let mut field = bare_field("age", FieldType::Number);
    field.validations.push(ValidationRule::new(
        RuleKind::Pattern,
        Some(Scalar::from("\\d+")),
        "Digits only",
    ));
    let constraint = compile(&field);

    // Dead configuration: reported, never enforced.
    assert!(matches!(
        constraint.diagnostics()[0],
        Diagnostic::IncompatibleRule { .. }
    ));
    assert!(constraint.check(Some(&FieldValue::from(7i64))).is_empty());
}

#[test]
fn rules_apply_in_declaration_order() {
    let mut field = bare_field("bio", FieldType::Text);
    field.validations.push(ValidationRule::new(
        RuleKind::MinLength,
        Some(Scalar::from(5i64)),
        "Too short",
    ));
    field.validations.push(ValidationRule::new(
        RuleKind::Pattern,
        Some(Scalar::from("[a-z ]+")),
        "Lowercase only",
    ));
    let constraint = compile(&field);

    let failures = constraint.check(Some(&FieldValue::from("AB")));
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].rule, Some(RuleKind::MinLength));
    assert_eq!(failures[1].rule, Some(RuleKind::Pattern));
}

#[test]
fn validate_skips_hidden_fields() {
    let mut toggle = bare_field("subscribe", FieldType::Checkbox);
    toggle.default_value = Some(Scalar::Boolean(false));

    let mut details = bare_field("frequency", FieldType::Text);
    details
        .validations
        .push(ValidationRule::new(RuleKind::Required, None, "Required"));
    details.conditional_display = Some(ConditionalRule {
        source_field_id: "subscribe".into(),
        operator: CondOperator::Eq,
        operand: Scalar::Boolean(true),
    });

    let fields = vec![toggle, details];
    let mut values = ValueMap::new();
    values.insert("subscribe".into(), FieldValue::Boolean(false));

    // Hidden, so its required rule must not fire.
    let result = validate(&fields, &values);
    assert!(result.valid);

    values.insert("subscribe".into(), FieldValue::Boolean(true));
    let result = validate(&fields, &values);
    assert!(!result.valid);
    assert_eq!(result.errors[0].field_id, "frequency");
}

#[test]
fn validate_reports_unknown_value_keys() {
    let fields = vec![bare_field("name", FieldType::Text)];
    let mut values = ValueMap::new();
    values.insert("ghost".into(), FieldValue::from("boo"));

    let result = validate(&fields, &values);
    assert!(!result.valid);
    assert_eq!(result.unknown_fields, vec!["ghost"]);
}
