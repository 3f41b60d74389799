use serde_json::{Map, Value, json};

use crate::spec::field::{Field, FieldType, RuleKind, Scalar};
use crate::visibility::VisibilityMap;

/// JSON Schema (draft-07) for the submission payload of the currently
/// visible fields. Hidden fields are omitted entirely so their values are
/// rejected along with any other unknown key.
pub fn submission_schema(fields: &[Field], visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        if !visibility.get(&field.id).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(field.id.clone(), field_schema(field));
        if field.is_required() {
            required.push(Value::String(field.id.clone()));
        }
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(field: &Field) -> Value {
    let mut schema = Map::new();
    schema.insert("title".into(), Value::String(field.label.clone()));

    match field.kind {
        FieldType::Number => {
            schema.insert("type".into(), json!("number"));
        }
        FieldType::Checkbox => {
            schema.insert("type".into(), json!("boolean"));
        }
        FieldType::Email => {
            schema.insert("type".into(), json!("string"));
            schema.insert("format".into(), json!("email"));
        }
        FieldType::Date => {
            schema.insert("type".into(), json!("string"));
            schema.insert("format".into(), json!("date"));
        }
        _ => {
            schema.insert("type".into(), json!("string"));
        }
    }

    if let Some(options) = &field.options {
        let values: Vec<Value> = options
            .iter()
            .map(|option| Value::String(option.value.clone()))
            .collect();
        schema.insert("enum".into(), Value::Array(values));
    }

    for rule in &field.validations {
        match rule.kind {
            RuleKind::Min if field.kind.is_numeric() => {
                if let Some(bound) = rule.numeric_operand() {
                    schema.insert("minimum".into(), json!(bound));
                }
            }
            RuleKind::Max if field.kind.is_numeric() => {
                if let Some(bound) = rule.numeric_operand() {
                    schema.insert("maximum".into(), json!(bound));
                }
            }
            RuleKind::MinLength if field.kind.is_string_like() => {
                if let Some(bound) = rule.length_operand() {
                    schema.insert("minLength".into(), json!(bound));
                }
            }
            RuleKind::MaxLength if field.kind.is_string_like() => {
                if let Some(bound) = rule.length_operand() {
                    schema.insert("maxLength".into(), json!(bound));
                }
            }
            RuleKind::Pattern if field.kind.is_string_like() => {
                if let Some(source) = rule.operand.as_ref().and_then(Scalar::as_text) {
                    schema.insert("pattern".into(), json!(source));
                }
            }
            RuleKind::Email => {
                schema.insert("format".into(), json!("email"));
            }
            _ => {}
        }
    }

    Value::Object(schema)
}
