//! Live input values and the loose-comparison semantics shared by the
//! in-app evaluator and the generated document script.
//!
//! Coercion table:
//! - numbers compare numerically; booleans coerce to 1/0
//! - a string coerces numerically iff its trimmed form parses as a finite
//!   float (the empty string does not)
//! - `==`/`!=` compare strings as strings and booleans as booleans, and
//!   otherwise fall back to numeric equality when both sides coerce (so
//!   `"18" == 18` and `true == 1`, while `"true" != true`)
//! - ordering operators compare numerically when both sides coerce, else
//!   lexically over display strings
//! - file references never coerce; they compare via their handle string

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::spec::field::Scalar;

/// A live input value as held by the host while the form is being filled.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Opaque handle to an attached file (its name, in practice).
    FileRef(String),
}

/// Current input state keyed by field id. Owned by the host and passed by
/// reference into every core entry point.
pub type ValueMap = BTreeMap<String, FieldValue>;

impl FieldValue {
    /// True for values that count as "not provided": the empty string.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }

    /// Display string used by string-level comparisons and generators.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(num) => display_number(*num),
            FieldValue::Boolean(flag) => flag.to_string(),
            FieldValue::FileRef(handle) => handle.clone(),
        }
    }

    fn numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Number(num) => Some(*num),
            FieldValue::Boolean(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            FieldValue::Text(text) => parse_numeric(text),
            FieldValue::FileRef(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|num| num.is_finite())
}

fn scalar_numeric(operand: &Scalar) -> Option<f64> {
    match operand {
        Scalar::Number(num) => num.as_f64(),
        Scalar::Boolean(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Scalar::Text(text) => parse_numeric(text),
    }
}

fn display_number(num: f64) -> String {
    if num.is_finite() && num.fract() == 0.0 && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        num.to_string()
    }
}

/// Loose equality between a live value and a rule operand.
pub fn loose_eq(value: &FieldValue, operand: &Scalar) -> bool {
    match (value, operand) {
        (FieldValue::Text(text), Scalar::Text(other)) => text == other,
        (FieldValue::FileRef(handle), Scalar::Text(other)) => handle == other,
        (FieldValue::Boolean(flag), Scalar::Boolean(other)) => flag == other,
        _ => match (value.numeric(), scalar_numeric(operand)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
    }
}

/// Ordering between a live value and a rule operand: numeric when both
/// sides coerce, lexical over display strings otherwise.
pub fn loose_cmp(value: &FieldValue, operand: &Scalar) -> Ordering {
    match (value.numeric(), scalar_numeric(operand)) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        _ => value.display().cmp(&operand.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_string_equals_number() {
        assert!(loose_eq(&FieldValue::from("18"), &Scalar::from(18i64)));
        assert!(loose_eq(&FieldValue::from(18i64), &Scalar::from("18")));
    }

    #[test]
    fn boolean_coerces_to_one_and_zero() {
        assert!(loose_eq(&FieldValue::from(true), &Scalar::from(1i64)));
        assert!(loose_eq(&FieldValue::from(false), &Scalar::from(0i64)));
        assert!(loose_eq(&FieldValue::from("1"), &Scalar::from(true)));
    }

    #[test]
    fn boolean_never_equals_its_spelling() {
        assert!(!loose_eq(&FieldValue::from("true"), &Scalar::from(true)));
    }

    #[test]
    fn both_strings_compare_as_strings() {
        // "01" coerces numerically, but string/string wins first.
        assert!(!loose_eq(&FieldValue::from("01"), &Scalar::from("1")));
        assert!(loose_eq(&FieldValue::from("abc"), &Scalar::from("abc")));
    }

    #[test]
    fn ordering_prefers_numeric_comparison() {
        assert_eq!(
            loose_cmp(&FieldValue::from("9"), &Scalar::from(10i64)),
            Ordering::Less
        );
        // Lexically "9" > "10"; numeric coercion must win here.
        assert_eq!(
            loose_cmp(&FieldValue::from(9i64), &Scalar::from("10")),
            Ordering::Less
        );
    }

    #[test]
    fn ordering_falls_back_to_lexical() {
        assert_eq!(
            loose_cmp(&FieldValue::from("apple"), &Scalar::from("banana")),
            Ordering::Less
        );
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(FieldValue::from(15i64).display(), "15");
        assert_eq!(FieldValue::Number(15.5).display(), "15.5");
    }
}
