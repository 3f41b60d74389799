use proptest::prelude::*;

use form_spec::{
    CondOperator, ConditionalRule, Field, FieldOption, FieldType, Form, RuleKind, Scalar,
    ValidationRule,
};

fn fixture() -> &'static str {
    include_str!("fixtures/contact_form.json")
}

#[test]
fn fixture_parses_and_reserializes_identically() {
    let form = Form::from_json(fixture()).expect("parse fixture");
    assert_eq!(form.title, "Contact Us");
    assert_eq!(form.fields.len(), 5);

    let serialized = form.to_json_pretty().expect("serialize");
    let reparsed = Form::from_json(&serialized).expect("reparse");
    assert_eq!(reparsed, form);

    // Structural comparison too: absent optionals must stay absent.
    let original: serde_json::Value = serde_json::from_str(fixture()).expect("fixture json");
    let emitted: serde_json::Value = serde_json::from_str(&serialized).expect("emitted json");
    assert_eq!(emitted, original);
}

#[test]
fn absent_optional_attributes_are_not_serialized_as_null() {
    let form = Form::from_json(fixture()).expect("parse fixture");
    let serialized = form.to_json_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&serialized).expect("json");

    let name = &value["fields"][0];
    assert!(name.get("defaultValue").is_none());
    assert!(name.get("options").is_none());
    assert!(name.get("conditionalDisplay").is_none());
    assert!(name.get("isManuallyHidden").is_none());
}

#[test]
fn builder_lifecycle_operations() {
    let mut form = Form::new("Survey");
    let select_id = form.add_field(FieldType::Select);
    let text_id = form.add_field(FieldType::Text);

    let select = form.field(&select_id).expect("select field");
    assert_eq!(select.options.as_deref().map(<[FieldOption]>::len), Some(2));

    assert!(form.add_option(&select_id));
    assert!(!form.add_option(&text_id));
    let select = form.field(&select_id).expect("select field");
    assert_eq!(select.options.as_deref().map(<[FieldOption]>::len), Some(3));

    let copy_id = form.duplicate_field(&select_id).expect("duplicate");
    assert_eq!(form.fields[1].id, copy_id);
    assert!(form.fields[1].label.ends_with("(copy)"));

    assert!(form.remove_field(&text_id));
    assert!(!form.remove_field(&text_id));
    assert_eq!(form.fields.len(), 2);
}

fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Boolean),
        any::<i32>().prop_map(|num| Scalar::Number(num.into())),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Scalar::Text),
    ]
}

fn rule_strategy() -> impl Strategy<Value = ValidationRule> {
    (
        prop_oneof![
            Just(RuleKind::Required),
            Just(RuleKind::Min),
            Just(RuleKind::Max),
            Just(RuleKind::Pattern),
            Just(RuleKind::MinLength),
            Just(RuleKind::MaxLength),
            Just(RuleKind::Email),
        ],
        proptest::option::of(scalar_strategy()),
        "[a-zA-Z0-9 ]{1,16}",
    )
        .prop_map(|(kind, operand, message)| ValidationRule::new(kind, operand, message))
}

fn conditional_strategy() -> impl Strategy<Value = ConditionalRule> {
    (
        "[a-z]{1,8}",
        prop_oneof![
            Just(CondOperator::Eq),
            Just(CondOperator::Ne),
            Just(CondOperator::Gt),
            Just(CondOperator::Contains),
            Just(CondOperator::EndsWith),
        ],
        scalar_strategy(),
    )
        .prop_map(|(source, operator, operand)| ConditionalRule {
            source_field_id: format!("field_{source}"),
            operator,
            operand,
        })
}

fn field_strategy() -> impl Strategy<Value = Field> {
    (
        "[a-z0-9]{1,8}",
        prop_oneof![
            Just(FieldType::Text),
            Just(FieldType::Email),
            Just(FieldType::Number),
            Just(FieldType::Select),
            Just(FieldType::Checkbox),
            Just(FieldType::Textarea),
        ],
        "[a-zA-Z ]{1,12}",
        proptest::option::of("[a-zA-Z ]{0,10}".prop_map(String::from)),
        proptest::option::of(scalar_strategy()),
        proptest::collection::vec(rule_strategy(), 0..3),
        proptest::option::of(conditional_strategy()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(id, kind, label, placeholder, default_value, validations, conditional, hidden)| {
                Field {
                    id: format!("field_{id}"),
                    kind,
                    label,
                    placeholder,
                    default_value,
                    options: kind.has_options().then(|| {
                        vec![
                            FieldOption::from_label("Option 1"),
                            FieldOption::from_label("Option 2"),
                        ]
                    }),
                    validations,
                    conditional_display: conditional,
                    is_manually_hidden: hidden,
                }
            },
        )
}

proptest! {
    #[test]
    fn any_form_round_trips_through_json(
        title in "[a-zA-Z0-9 ]{0,20}",
        fields in proptest::collection::vec(field_strategy(), 0..6),
    ) {
        let form = Form { title, fields };
        let text = form.to_json_pretty().expect("serialize");
        let parsed = Form::from_json(&text).expect("parse");
        prop_assert_eq!(parsed, form);
    }
}
