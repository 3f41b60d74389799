use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of input types a field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Select,
    Checkbox,
    Radio,
    File,
    Date,
    Textarea,
}

impl FieldType {
    /// Stable lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::File => "file",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
        }
    }

    /// Types whose submitted value is carried as a string.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Email
                | FieldType::Select
                | FieldType::Radio
                | FieldType::Date
                | FieldType::Textarea
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number)
    }

    /// Types that carry a per-field option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named constraint kinds a validation rule can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    Min,
    Max,
    Pattern,
    MinLength,
    MaxLength,
    Email,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Pattern => "pattern",
            RuleKind::MinLength => "minLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::Email => "email",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON-facing `string | number | boolean` union used by rule operands,
/// conditional operands, and default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(num) => num.as_f64(),
            _ => None,
        }
    }

    /// Display string used by string-level comparisons and generators.
    pub fn display(&self) -> String {
        match self {
            Scalar::Boolean(flag) => flag.to_string(),
            Scalar::Number(num) => num.to_string(),
            Scalar::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

/// A single named constraint attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Scalar>,
    pub message: String,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, operand: Option<Scalar>, message: impl Into<String>) -> Self {
        Self {
            kind,
            operand,
            message: message.into(),
        }
    }

    /// Freshly added rule with the default message and a kind-appropriate
    /// starter operand, as seeded by the settings surface.
    pub fn seeded(kind: RuleKind) -> Self {
        let message = if kind == RuleKind::Required {
            "Field is required"
        } else {
            "Field is invalid"
        };
        let operand = match kind {
            RuleKind::Min | RuleKind::Max => Some(Scalar::from(0i64)),
            RuleKind::MinLength | RuleKind::MaxLength => Some(Scalar::from(1i64)),
            RuleKind::Pattern => Some(Scalar::from("")),
            _ => None,
        };
        Self::new(kind, operand, message)
    }

    /// Numeric view of the operand, when it carries one.
    pub fn numeric_operand(&self) -> Option<f64> {
        match self.operand.as_ref()? {
            Scalar::Number(num) => num.as_f64(),
            Scalar::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|num| !num.is_nan())
            }
            Scalar::Boolean(_) => None,
        }
    }

    /// Non-negative integer view of the operand, for length bounds.
    pub fn length_operand(&self) -> Option<usize> {
        self.numeric_operand()
            .filter(|num| *num >= 0.0 && num.fract() == 0.0)
            .map(|num| num as usize)
    }
}

/// One selectable choice of a select/radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    /// Option whose value is auto-derived from the label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let value = slugify(&label);
        Self { label, value }
    }
}

/// Lower-cases and replaces each whitespace run with a hyphen.
pub fn slugify(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_run = false;
    for ch in lower.chars() {
        if ch.is_whitespace() {
            if !in_run {
                slug.push('-');
                in_run = true;
            }
        } else {
            slug.push(ch);
            in_run = false;
        }
    }
    slug
}

/// Comparison operators available to conditional-display rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CondOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
}

impl CondOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CondOperator::Eq => "==",
            CondOperator::Ne => "!=",
            CondOperator::Gt => ">",
            CondOperator::Lt => "<",
            CondOperator::Ge => ">=",
            CondOperator::Le => "<=",
            CondOperator::Contains => "contains",
            CondOperator::StartsWith => "startsWith",
            CondOperator::EndsWith => "endsWith",
        }
    }
}

impl fmt::Display for CondOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over another field's value controlling this field's visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub source_field_id: String,
    pub operator: CondOperator,
    pub operand: Scalar,
}

/// One form input's full declarative definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default)]
    pub validations: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_display: Option<ConditionalRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_manually_hidden: Option<bool>,
}

impl Field {
    /// Fresh field with a unique id and type-appropriate defaults.
    pub fn new(kind: FieldType) -> Self {
        let options = kind.has_options().then(|| {
            vec![
                FieldOption::from_label("Option 1"),
                FieldOption::from_label("Option 2"),
            ]
        });
        let default_value = matches!(kind, FieldType::Checkbox).then(|| Scalar::Boolean(false));
        Self {
            id: fresh_id(),
            kind,
            label: format!("New {kind} field"),
            placeholder: Some(format!("Enter {kind}")),
            default_value,
            options,
            validations: Vec::new(),
            conditional_display: None,
            is_manually_hidden: None,
        }
    }

    /// Clone carrying every attribute except the id, with a `(copy)` suffix.
    pub fn duplicate(&self) -> Self {
        Self {
            id: fresh_id(),
            label: format!("{} (copy)", self.label),
            ..self.clone()
        }
    }

    pub fn is_required(&self) -> bool {
        self.validations
            .iter()
            .any(|rule| rule.kind == RuleKind::Required)
    }
}

fn fresh_id() -> String {
    format!("field_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Contact  Reason"), "contact-reason");
        assert_eq!(slugify("Option 1"), "option-1");
        assert_eq!(slugify("plain"), "plain");
    }

    #[test]
    fn new_select_field_seeds_two_options() {
        let field = Field::new(FieldType::Select);
        let options = field.options.as_deref().unwrap_or_default();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "option-1");
    }

    #[test]
    fn new_checkbox_defaults_unchecked() {
        let field = Field::new(FieldType::Checkbox);
        assert_eq!(field.default_value, Some(Scalar::Boolean(false)));
    }

    #[test]
    fn seeded_rules_carry_default_message_and_operand() {
        let required = ValidationRule::seeded(RuleKind::Required);
        assert_eq!(required.message, "Field is required");
        assert_eq!(required.operand, None);

        let min = ValidationRule::seeded(RuleKind::Min);
        assert_eq!(min.message, "Field is invalid");
        assert_eq!(min.numeric_operand(), Some(0.0));

        let min_length = ValidationRule::seeded(RuleKind::MinLength);
        assert_eq!(min_length.length_operand(), Some(1));
    }

    #[test]
    fn duplicate_gets_fresh_id_and_copy_suffix() {
        let field = Field::new(FieldType::Text);
        let copy = field.duplicate();
        assert_ne!(copy.id, field.id);
        assert_eq!(copy.label, format!("{} (copy)", field.label));
        assert_eq!(copy.validations, field.validations);
    }
}
