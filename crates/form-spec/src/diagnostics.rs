use thiserror::Error;

use crate::spec::field::{FieldType, RuleKind};

/// Non-fatal anomalies surfaced while compiling constraints and resolving
/// visibility. Each one degrades to a conservative state (always-failing
/// rule, hidden field, ignored rule) instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("field '{field_id}': {kind} rule has a malformed operand: {detail}")]
    MalformedRuleOperand {
        field_id: String,
        kind: RuleKind,
        detail: String,
    },
    #[error("field '{field_id}': conditional display references unknown field '{source_id}'")]
    UnresolvedDependency { field_id: String, source_id: String },
    #[error("field '{field_id}': {kind} rule does not apply to {field_type} fields")]
    IncompatibleRule {
        field_id: String,
        kind: RuleKind,
        field_type: FieldType,
    },
}
