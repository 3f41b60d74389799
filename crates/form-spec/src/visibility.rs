use std::collections::BTreeSet;

use crate::spec::field::{CondOperator, ConditionalRule, Field};
use crate::value::{FieldValue, ValueMap, loose_cmp, loose_eq};

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Computes the visibility flag for every field given the current inputs.
///
/// Fields default to visible. A field with a conditional-display rule reads
/// the raw current value of its source field: while the source has no value
/// the dependent stays hidden, and a rule referencing a field that does not
/// exist keeps its owner hidden permanently. Visibility never consults
/// another field's computed visibility, so dependency cycles cannot recurse.
pub fn resolve_visibility(fields: &[Field], values: &ValueMap) -> VisibilityMap {
    let ids: BTreeSet<&str> = fields.iter().map(|field| field.id.as_str()).collect();

    let mut map = VisibilityMap::new();
    for field in fields {
        let visible = match &field.conditional_display {
            Some(rule) if !ids.contains(rule.source_field_id.as_str()) => false,
            Some(rule) => evaluate_rule(rule, values.get(&rule.source_field_id)),
            None => true,
        };
        map.insert(field.id.clone(), visible);
    }
    map
}

fn evaluate_rule(rule: &ConditionalRule, source: Option<&FieldValue>) -> bool {
    let Some(value) = source else {
        return false;
    };
    match rule.operator {
        CondOperator::Eq => loose_eq(value, &rule.operand),
        CondOperator::Ne => !loose_eq(value, &rule.operand),
        CondOperator::Gt => loose_cmp(value, &rule.operand).is_gt(),
        CondOperator::Lt => loose_cmp(value, &rule.operand).is_lt(),
        CondOperator::Ge => loose_cmp(value, &rule.operand).is_ge(),
        CondOperator::Le => loose_cmp(value, &rule.operand).is_le(),
        CondOperator::Contains => value.display().contains(&rule.operand.display()),
        CondOperator::StartsWith => value.display().starts_with(&rule.operand.display()),
        CondOperator::EndsWith => value.display().ends_with(&rule.operand.display()),
    }
}
