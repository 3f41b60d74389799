//! Standalone HTML document generator: markup plus an embedded script that
//! re-implements conditional visibility and rule checking client-side,
//! using the same coercion table as the in-app evaluator. An untouched
//! source control reads as the absent value, which keeps dependents hidden,
//! and hidden controls are disabled rather than removed so their values
//! stay out of the submission.

use handlebars::Handlebars;
use serde_json::{Value, json};

use form_spec::{Field, FieldType, Scalar};

use crate::ExportError;
use crate::escape::html_escape;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{title}}</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      line-height: 1.5;
      padding: 1rem;
      max-width: 600px;
      margin: 0 auto;
    }
    .form-group {
      margin-bottom: 1rem;
    }
    label {
      display: block;
      margin-bottom: 0.5rem;
      font-weight: 500;
    }
    input, select, textarea {
      width: 100%;
      padding: 0.5rem;
      border: 1px solid #d1d5db;
      border-radius: 0.25rem;
      font-size: 1rem;
    }
    button {
      background-color: #2563eb;
      color: white;
      border: none;
      padding: 0.5rem 1rem;
      border-radius: 0.25rem;
      cursor: pointer;
      font-size: 1rem;
    }
    button:hover {
      background-color: #1d4ed8;
    }
    .error {
      color: red;
      font-size: 0.875rem;
      margin-top: 0.25rem;
    }
  </style>
</head>
<body>
  <h2>{{title}}</h2>
  <form id="generatedForm" novalidate>
{{{fields}}}
    <button type="submit">Submit</button>
  </form>

  <script>
{{{script}}}
  </script>
</body>
</html>
"#;

/// Renders the complete document for the field list.
pub fn generate(title: &str, fields: &[Field]) -> Result<String, ExportError> {
    let mut registry = Handlebars::new();
    registry.register_template_string("document", DOCUMENT_TEMPLATE)?;

    let markup = fields
        .iter()
        .map(field_markup)
        .collect::<Vec<_>>()
        .join("\n");
    let script = build_script(fields)?;

    Ok(registry.render(
        "document",
        &json!({
            "title": title,
            "fields": markup,
            "script": script,
        }),
    )?)
}

fn field_markup(field: &Field) -> String {
    // Conditionals start hidden; the script reveals them once satisfied.
    let hidden = if field.conditional_display.is_some() {
        " style=\"display: none;\""
    } else {
        ""
    };
    let mut markup = format!(
        "    <div class=\"form-group\" id=\"group-{id}\"{hidden}>\n      <label for=\"{id}\">{label}</label>",
        id = field.id,
        label = html_escape(&field.label)
    );
    markup.push_str(&control_markup(field));
    markup.push_str(&format!(
        "\n      <div class=\"error\" id=\"{}-error\"></div>\n    </div>",
        field.id
    ));
    markup
}

fn control_markup(field: &Field) -> String {
    let placeholder = html_escape(field.placeholder.as_deref().unwrap_or(""));
    let required_attr = if field.is_required() { " required" } else { "" };
    let default_text = field.default_value.as_ref().map(Scalar::display);

    match field.kind {
        FieldType::Text | FieldType::Email | FieldType::Number | FieldType::Date => {
            let value_attr = default_text
                .map(|text| format!(" value=\"{}\"", html_escape(&text)))
                .unwrap_or_default();
            format!(
                "\n      <input type=\"{kind}\" id=\"{id}\" name=\"{id}\" placeholder=\"{placeholder}\"{required_attr}{value_attr}>",
                kind = field.kind,
                id = field.id
            )
        }
        FieldType::Textarea => format!(
            "\n      <textarea id=\"{id}\" name=\"{id}\" placeholder=\"{placeholder}\"{required_attr}>{content}</textarea>",
            id = field.id,
            content = default_text
                .map(|text| html_escape(&text))
                .unwrap_or_default()
        ),
        FieldType::Select => {
            let options = field
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|option| {
                    let selected = if default_text.as_deref() == Some(option.value.as_str()) {
                        " selected"
                    } else {
                        ""
                    };
                    format!(
                        "        <option value=\"{}\"{selected}>{}</option>",
                        html_escape(&option.value),
                        html_escape(&option.label)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "\n      <select id=\"{id}\" name=\"{id}\"{required_attr}>\n        <option value=\"\">Select an option</option>\n{options}\n      </select>",
                id = field.id
            )
        }
        FieldType::Checkbox => {
            let checked = if field.default_value == Some(Scalar::Boolean(true)) {
                " checked"
            } else {
                ""
            };
            let caption = if placeholder.is_empty() {
                "Checkbox".to_string()
            } else {
                placeholder
            };
            format!(
                "\n      <div>\n        <input type=\"checkbox\" id=\"{id}\" name=\"{id}\"{checked}>\n        <label for=\"{id}\" style=\"display: inline;\">{caption}</label>\n      </div>",
                id = field.id
            )
        }
        FieldType::Radio => {
            let options = field
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    let checked = if default_text.as_deref() == Some(option.value.as_str()) {
                        " checked"
                    } else {
                        ""
                    };
                    format!(
                        "        <div>\n          <input type=\"radio\" id=\"{id}-{index}\" name=\"{id}\" value=\"{value}\"{checked}>\n          <label for=\"{id}-{index}\" style=\"display: inline;\">{label}</label>\n        </div>",
                        id = field.id,
                        value = html_escape(&option.value),
                        label = html_escape(&option.label)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n      <div>\n{options}\n      </div>")
        }
        FieldType::File => format!(
            "\n      <input type=\"file\" id=\"{id}\" name=\"{id}\"{required_attr}>",
            id = field.id
        ),
    }
}

fn build_script(fields: &[Field]) -> Result<String, ExportError> {
    let entries: Vec<Value> = fields
        .iter()
        .map(|field| {
            json!({
                "id": field.id,
                "type": field.kind,
                "rules": field.validations,
                "conditional": field.conditional_display,
            })
        })
        .collect();
    // "</" would terminate the surrounding script element early.
    let config = serde_json::to_string(&Value::Array(entries))?.replace("</", "<\\/");

    Ok(format!(
        "    const FIELDS = {config};\n{RUNTIME}"
    ))
}

const RUNTIME: &str = r#"
    document.addEventListener('DOMContentLoaded', function () {
      const form = document.getElementById('generatedForm');
      const EMAIL_RE = /^[^\s@]+@[^\s@]+\.[^\s@]+$/;

      function readValue(field) {
        if (field.type === 'checkbox') {
          const el = document.getElementById(field.id);
          return el ? el.checked : null;
        }
        if (field.type === 'radio') {
          const checked = document.querySelector('input[name="' + field.id + '"]:checked');
          return checked ? checked.value : null;
        }
        if (field.type === 'file') {
          const el = document.getElementById(field.id);
          return el && el.files && el.files.length > 0 ? el.files[0].name : null;
        }
        const el = document.getElementById(field.id);
        // An untouched control reads as the absent value.
        if (!el || el.value === '') return null;
        return el.value;
      }

      function numericOf(value) {
        if (typeof value === 'number') return isFinite(value) ? value : null;
        if (typeof value === 'boolean') return value ? 1 : 0;
        if (typeof value === 'string') {
          const trimmed = value.trim();
          if (trimmed === '') return null;
          const parsed = Number(trimmed);
          return isFinite(parsed) ? parsed : null;
        }
        return null;
      }

      function displayOf(value) {
        return String(value);
      }

      function looseEq(left, right) {
        if (typeof left === 'string' && typeof right === 'string') return left === right;
        if (typeof left === 'boolean' && typeof right === 'boolean') return left === right;
        const a = numericOf(left);
        const b = numericOf(right);
        return a !== null && b !== null && a === b;
      }

      function looseCmp(left, right) {
        const a = numericOf(left);
        const b = numericOf(right);
        if (a !== null && b !== null) return a < b ? -1 : a > b ? 1 : 0;
        const x = displayOf(left);
        const y = displayOf(right);
        return x < y ? -1 : x > y ? 1 : 0;
      }

      function conditionHolds(rule, value) {
        if (value === null) return false;
        switch (rule.operator) {
          case '==': return looseEq(value, rule.operand);
          case '!=': return !looseEq(value, rule.operand);
          case '>': return looseCmp(value, rule.operand) > 0;
          case '<': return looseCmp(value, rule.operand) < 0;
          case '>=': return looseCmp(value, rule.operand) >= 0;
          case '<=': return looseCmp(value, rule.operand) <= 0;
          case 'contains': return displayOf(value).includes(displayOf(rule.operand));
          case 'startsWith': return displayOf(value).startsWith(displayOf(rule.operand));
          case 'endsWith': return displayOf(value).endsWith(displayOf(rule.operand));
          default: return false;
        }
      }

      function fieldById(id) {
        return FIELDS.find(function (field) { return field.id === id; });
      }

      function updateVisibility() {
        FIELDS.forEach(function (field) {
          if (!field.conditional) return;
          const group = document.getElementById('group-' + field.id);
          if (!group) return;
          const source = fieldById(field.conditional.sourceFieldId);
          const shouldShow = source
            ? conditionHolds(field.conditional, readValue(source))
            : false;
          group.style.display = shouldShow ? 'block' : 'none';
          // Disabled controls are excluded from the submission payload.
          group.querySelectorAll('input, select, textarea').forEach(function (input) {
            input.disabled = !shouldShow;
          });
        });
      }

      function isStringLike(type) {
        return ['text', 'email', 'select', 'radio', 'date', 'textarea'].indexOf(type) !== -1;
      }

      function validateField(field) {
        const value = readValue(field);
        const requiredRule = field.rules.find(function (rule) { return rule.kind === 'required'; });
        if (value === null || (field.type === 'checkbox' && value === false)) {
          return requiredRule ? [requiredRule.message] : [];
        }

        const errors = [];
        if (field.type === 'email' && !EMAIL_RE.test(displayOf(value))) {
          errors.push('Invalid email address');
        }
        if (field.type === 'number' && numericOf(value) === null) {
          errors.push('Expected a number');
        }
        field.rules.forEach(function (rule) {
          switch (rule.kind) {
            case 'min':
              if (field.type === 'number') {
                const num = numericOf(value);
                if (num !== null && num < rule.operand) errors.push(rule.message);
              }
              break;
            case 'max':
              if (field.type === 'number') {
                const num = numericOf(value);
                if (num !== null && num > rule.operand) errors.push(rule.message);
              }
              break;
            case 'minLength':
              if (isStringLike(field.type) && displayOf(value).length < rule.operand) {
                errors.push(rule.message);
              }
              break;
            case 'maxLength':
              if (isStringLike(field.type) && displayOf(value).length > rule.operand) {
                errors.push(rule.message);
              }
              break;
            case 'pattern':
              if (isStringLike(field.type)) {
                try {
                  const re = new RegExp('^(?:' + rule.operand + ')$');
                  if (!re.test(displayOf(value))) errors.push(rule.message);
                } catch (err) {
                  // Unparseable pattern fails closed.
                  errors.push(rule.message);
                }
              }
              break;
            case 'email':
              if (!EMAIL_RE.test(displayOf(value))) errors.push(rule.message);
              break;
          }
        });
        return errors;
      }

      form.addEventListener('submit', function (event) {
        event.preventDefault();

        let valid = true;
        FIELDS.forEach(function (field) {
          const group = document.getElementById('group-' + field.id);
          const errorBox = document.getElementById(field.id + '-error');
          if (errorBox) errorBox.textContent = '';
          if (group && group.style.display === 'none') return;
          const errors = validateField(field);
          if (errors.length > 0) {
            valid = false;
            if (errorBox) errorBox.textContent = errors[0];
          }
        });

        if (valid) {
          const data = Object.fromEntries(new FormData(form).entries());
          console.log('Form data:', data);
          alert('Form submitted successfully!');
        }
      });

      form.addEventListener('input', updateVisibility);
      form.addEventListener('change', updateVisibility);
      updateVisibility();
    });
"#;
