use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::spec::field::{Field, FieldType, RuleKind, Scalar, ValidationRule};
use crate::value::{FieldValue, ValueMap};
use crate::visibility::resolve_visibility;

/// Email shape shared by the `email` base type and the `email` rule.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// A single rejected constraint: the rule kind that failed (absent for
/// base-shape failures) plus the configured message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleKind>,
    pub message: String,
}

/// Aggregate outcome of validating a full value map against a field list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub unknown_fields: Vec<String>,
}

/// Value shape expected before any rule applies, derived from the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseShape {
    Text,
    Email,
    Numeric,
    Boolean,
    File,
}

impl BaseShape {
    fn for_type(kind: FieldType) -> Self {
        match kind {
            FieldType::Email => BaseShape::Email,
            FieldType::Number => BaseShape::Numeric,
            FieldType::Checkbox => BaseShape::Boolean,
            FieldType::File => BaseShape::File,
            _ => BaseShape::Text,
        }
    }

    fn mismatch_message(&self) -> &'static str {
        match self {
            BaseShape::Text => "Expected a text value",
            BaseShape::Email => "Invalid email address",
            BaseShape::Numeric => "Expected a number",
            BaseShape::Boolean => "Expected a boolean",
            BaseShape::File => "Expected a file",
        }
    }
}

#[derive(Debug, Clone)]
enum Check {
    Min { bound: f64, message: String },
    Max { bound: f64, message: String },
    MinLength { bound: usize, message: String },
    MaxLength { bound: usize, message: String },
    Pattern { regex: Regex, message: String },
    Email { message: String },
    AlwaysFail { rule: RuleKind, message: String },
}

impl Check {
    fn rule(&self) -> RuleKind {
        match self {
            Check::Min { .. } => RuleKind::Min,
            Check::Max { .. } => RuleKind::Max,
            Check::MinLength { .. } => RuleKind::MinLength,
            Check::MaxLength { .. } => RuleKind::MaxLength,
            Check::Pattern { .. } => RuleKind::Pattern,
            Check::Email { .. } => RuleKind::Email,
            Check::AlwaysFail { rule, .. } => *rule,
        }
    }

    fn message(&self) -> &str {
        match self {
            Check::Min { message, .. }
            | Check::Max { message, .. }
            | Check::MinLength { message, .. }
            | Check::MaxLength { message, .. }
            | Check::Pattern { message, .. }
            | Check::Email { message }
            | Check::AlwaysFail { message, .. } => message,
        }
    }
}

/// Executable form of one field's validation rules.
#[derive(Debug, Clone)]
pub struct CompiledConstraint {
    field_id: String,
    base: BaseShape,
    required: Option<String>,
    checks: Vec<Check>,
    diagnostics: Vec<Diagnostic>,
}

/// Compiles a field's type and rule list into an executable constraint.
///
/// Compilation never fails: a malformed operand degrades the rule to an
/// always-failing check, an incompatible rule kind is dropped as dead
/// configuration, and both are reported through
/// [`CompiledConstraint::diagnostics`].
pub fn compile(field: &Field) -> CompiledConstraint {
    let mut required = None;
    let mut checks = Vec::new();
    let mut diagnostics = Vec::new();

    for rule in &field.validations {
        match rule.kind {
            RuleKind::Required => {
                if required.is_none() {
                    required = Some(rule.message.clone());
                }
            }
            RuleKind::Min | RuleKind::Max => {
                if !field.kind.is_numeric() {
                    diagnostics.push(incompatible(field, rule));
                    continue;
                }
                match rule.numeric_operand() {
                    Some(bound) if rule.kind == RuleKind::Min => checks.push(Check::Min {
                        bound,
                        message: rule.message.clone(),
                    }),
                    Some(bound) => checks.push(Check::Max {
                        bound,
                        message: rule.message.clone(),
                    }),
                    None => {
                        diagnostics.push(malformed(field, rule, "expected a numeric bound"));
                        checks.push(always_fail(rule));
                    }
                }
            }
            RuleKind::MinLength | RuleKind::MaxLength => {
                if !field.kind.is_string_like() {
                    diagnostics.push(incompatible(field, rule));
                    continue;
                }
                match rule.length_operand() {
                    Some(bound) if rule.kind == RuleKind::MinLength => {
                        checks.push(Check::MinLength {
                            bound,
                            message: rule.message.clone(),
                        });
                    }
                    Some(bound) => checks.push(Check::MaxLength {
                        bound,
                        message: rule.message.clone(),
                    }),
                    None => {
                        diagnostics.push(malformed(field, rule, "expected an integer length"));
                        checks.push(always_fail(rule));
                    }
                }
            }
            RuleKind::Pattern => {
                if !field.kind.is_string_like() {
                    diagnostics.push(incompatible(field, rule));
                    continue;
                }
                match rule.operand.as_ref().and_then(Scalar::as_text) {
                    // Anchored so the whole value must match, not a substring.
                    Some(source) => match Regex::new(&format!("^(?:{source})$")) {
                        Ok(regex) => checks.push(Check::Pattern {
                            regex,
                            message: rule.message.clone(),
                        }),
                        Err(err) => {
                            diagnostics.push(malformed(field, rule, &err.to_string()));
                            checks.push(always_fail(rule));
                        }
                    },
                    None => {
                        diagnostics.push(malformed(field, rule, "expected a pattern string"));
                        checks.push(always_fail(rule));
                    }
                }
            }
            RuleKind::Email => checks.push(Check::Email {
                message: rule.message.clone(),
            }),
        }
    }

    CompiledConstraint {
        field_id: field.id.clone(),
        base: BaseShape::for_type(field.kind),
        required,
        checks,
        diagnostics,
    }
}

fn incompatible(field: &Field, rule: &ValidationRule) -> Diagnostic {
    Diagnostic::IncompatibleRule {
        field_id: field.id.clone(),
        kind: rule.kind,
        field_type: field.kind,
    }
}

fn malformed(field: &Field, rule: &ValidationRule, detail: &str) -> Diagnostic {
    Diagnostic::MalformedRuleOperand {
        field_id: field.id.clone(),
        kind: rule.kind,
        detail: detail.to_string(),
    }
}

fn always_fail(rule: &ValidationRule) -> Check {
    Check::AlwaysFail {
        rule: rule.kind,
        message: rule.message.clone(),
    }
}

impl CompiledConstraint {
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Anomalies gathered while compiling, in rule order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Validates a candidate value; an empty result is acceptance.
    ///
    /// Absent or empty input fails only the `required` rule; without one it
    /// bypasses every other check, so the field is implicitly optional.
    pub fn check(&self, value: Option<&FieldValue>) -> Vec<ValidationError> {
        let Some(value) = value else {
            return self.required_failure();
        };
        if value.is_empty_text() {
            return self.required_failure();
        }
        if let FieldValue::Boolean(false) = value
            && self.base == BaseShape::Boolean
        {
            return self.required_failure();
        }

        if let Some(error) = self.base_failure(value) {
            return vec![error];
        }

        let mut failures = Vec::new();
        for check in &self.checks {
            let failed = match check {
                Check::Min { bound, .. } => {
                    candidate_number(value).is_some_and(|num| num < *bound)
                }
                Check::Max { bound, .. } => {
                    candidate_number(value).is_some_and(|num| num > *bound)
                }
                Check::MinLength { bound, .. } => {
                    candidate_text(value).is_some_and(|text| text.chars().count() < *bound)
                }
                Check::MaxLength { bound, .. } => {
                    candidate_text(value).is_some_and(|text| text.chars().count() > *bound)
                }
                Check::Pattern { regex, .. } => {
                    candidate_text(value).is_some_and(|text| !regex.is_match(text))
                }
                Check::Email { .. } => {
                    candidate_text(value).is_none_or(|text| !email_regex().is_match(text))
                }
                Check::AlwaysFail { .. } => true,
            };
            if failed {
                failures.push(ValidationError {
                    field_id: self.field_id.clone(),
                    rule: Some(check.rule()),
                    message: check.message().to_string(),
                });
            }
        }
        failures
    }

    fn required_failure(&self) -> Vec<ValidationError> {
        match &self.required {
            Some(message) => vec![ValidationError {
                field_id: self.field_id.clone(),
                rule: Some(RuleKind::Required),
                message: message.clone(),
            }],
            None => Vec::new(),
        }
    }

    fn base_failure(&self, value: &FieldValue) -> Option<ValidationError> {
        let ok = match self.base {
            BaseShape::Text => matches!(value, FieldValue::Text(_)),
            BaseShape::Email => match value {
                FieldValue::Text(text) => email_regex().is_match(text),
                _ => false,
            },
            BaseShape::Numeric => candidate_number(value).is_some(),
            BaseShape::Boolean => matches!(value, FieldValue::Boolean(_)),
            BaseShape::File => matches!(value, FieldValue::FileRef(_)),
        };
        (!ok).then(|| ValidationError {
            field_id: self.field_id.clone(),
            rule: None,
            message: self.base.mismatch_message().to_string(),
        })
    }
}

fn candidate_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(num) => Some(*num),
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|num| num.is_finite())
        }
        _ => None,
    }
}

fn candidate_text(value: &FieldValue) -> Option<&str> {
    match value {
        FieldValue::Text(text) => Some(text),
        _ => None,
    }
}

/// Validates every currently visible field against the live values.
///
/// Hidden fields are skipped: their controls are disabled in rendered
/// output and their values are excluded from submission.
pub fn validate(fields: &[Field], values: &ValueMap) -> ValidationResult {
    let visibility = resolve_visibility(fields, values);

    let mut errors = Vec::new();
    for field in fields {
        if !visibility.get(&field.id).copied().unwrap_or(true) {
            continue;
        }
        errors.extend(compile(field).check(values.get(&field.id)));
    }

    let known: BTreeSet<&str> = fields.iter().map(|field| field.id.as_str()).collect();
    let unknown_fields: Vec<String> = values
        .keys()
        .filter(|key| !known.contains(key.as_str()))
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && unknown_fields.is_empty(),
        errors,
        unknown_fields,
    }
}
