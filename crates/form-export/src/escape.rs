//! Escaping helpers shared by the text generators.

use form_spec::Scalar;

/// HTML attribute/body escaping for user-authored labels and placeholders.
pub(crate) fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A double-quoted JavaScript string literal.
pub(crate) fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// A JavaScript literal for a scalar operand or default value.
pub(crate) fn js_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Text(text) => js_string(text),
        Scalar::Number(num) => num.to_string(),
        Scalar::Boolean(flag) => flag.to_string(),
    }
}

/// Numeric literal without a trailing `.0` for whole values.
pub(crate) fn js_number(num: f64) -> String {
    if num.is_finite() && num.fract() == 0.0 && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        num.to_string()
    }
}
