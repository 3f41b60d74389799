//! Emits React + react-hook-form + zod component source for a form
//! definition. The schema text mirrors the runtime constraint compiler:
//! same base type per field, same rule-application order, `.optional()`
//! when no required rule is present.

use form_spec::{CondOperator, ConditionalRule, Field, FieldType, RuleKind, Scalar};

use crate::escape::{html_escape, js_number, js_scalar, js_string};

const IMPORTS: &str = r#"import { useForm } from "react-hook-form";
import { zodResolver } from "@hookform/resolvers/zod";
import * as z from "zod";
import { Button, Input, Textarea, Checkbox, Label, Select, RadioGroup } from "your-ui-library";"#;

/// Emits the complete component source for the field list.
pub fn generate(title: &str, fields: &[Field]) -> String {
    let schema = zod_schema(fields);
    let defaults = default_values(fields);
    let name = component_name(title);
    let body = fields
        .iter()
        .map(field_jsx)
        .collect::<Vec<_>>()
        .join("\n\n");
    let body = if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n\n")
    };

    format!(
        "{IMPORTS}\n\n{schema}\n\n{defaults}\n\nfunction {name}() {{\n  const form = useForm({{\n    resolver: zodResolver(formSchema),\n    defaultValues,\n  }});\n\n  function onSubmit(data) {{\n    console.log(data);\n    // Submit data to your API\n  }}\n\n  return (\n    <form onSubmit={{form.handleSubmit(onSubmit)}} className=\"space-y-6\">\n      <h2 className=\"text-2xl font-bold\">{}</h2>\n\n{body}      <Button type=\"submit\">Submit</Button>\n    </form>\n  );\n}}\n",
        html_escape(title)
    )
}

fn zod_schema(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "const formSchema = z.object({});".to_string();
    }
    let lines = fields
        .iter()
        .map(schema_line)
        .collect::<Vec<_>>()
        .join(",\n");
    format!("const formSchema = z.object({{\n{lines}\n}});")
}

fn schema_line(field: &Field) -> String {
    let mut chain = String::from(match field.kind {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Select
        | FieldType::Radio
        | FieldType::Date => "z.string()",
        FieldType::Email => "z.string().email()",
        FieldType::Number => "z.number()",
        FieldType::Checkbox => "z.boolean()",
        FieldType::File => "z.instanceof(FileList)",
    });

    for rule in &field.validations {
        match rule.kind {
            RuleKind::Required => match field.kind {
                FieldType::Checkbox => chain.push_str(&format!(
                    ".refine((value) => value === true, {{ message: {} }})",
                    js_string(&rule.message)
                )),
                // Presence of numbers and files is covered by optionality.
                FieldType::Number | FieldType::File => {}
                _ => chain.push_str(&format!(".min(1, {})", js_string(&rule.message))),
            },
            RuleKind::Min if field.kind.is_numeric() => {
                if let Some(bound) = rule.numeric_operand() {
                    chain.push_str(&format!(
                        ".min({}, {})",
                        js_number(bound),
                        js_string(&rule.message)
                    ));
                }
            }
            RuleKind::Max if field.kind.is_numeric() => {
                if let Some(bound) = rule.numeric_operand() {
                    chain.push_str(&format!(
                        ".max({}, {})",
                        js_number(bound),
                        js_string(&rule.message)
                    ));
                }
            }
            RuleKind::MinLength if field.kind.is_string_like() => {
                if let Some(bound) = rule.length_operand() {
                    chain.push_str(&format!(".min({bound}, {})", js_string(&rule.message)));
                }
            }
            RuleKind::MaxLength if field.kind.is_string_like() => {
                if let Some(bound) = rule.length_operand() {
                    chain.push_str(&format!(".max({bound}, {})", js_string(&rule.message)));
                }
            }
            RuleKind::Pattern if field.kind.is_string_like() => {
                if let Some(source) = rule.operand.as_ref().and_then(Scalar::as_text) {
                    chain.push_str(&format!(
                        ".regex(new RegExp({}), {{ message: {} }})",
                        js_string(source),
                        js_string(&rule.message)
                    ));
                }
            }
            RuleKind::Email => {
                chain.push_str(&format!(".email({})", js_string(&rule.message)));
            }
            // Incompatible rules are dead configuration here too.
            _ => {}
        }
    }

    if !field.is_required() {
        chain.push_str(".optional()");
    }

    format!("  {}: {}", field.id, chain)
}

fn default_values(fields: &[Field]) -> String {
    let lines = fields
        .iter()
        .filter_map(|field| {
            field
                .default_value
                .as_ref()
                .map(|value| format!("  {}: {}", field.id, js_scalar(value)))
        })
        .collect::<Vec<_>>()
        .join(",\n");
    if lines.is_empty() {
        "const defaultValues = {};".to_string()
    } else {
        format!("const defaultValues = {{\n{lines}\n}};")
    }
}

fn guard_expr(rule: &ConditionalRule) -> String {
    let source = format!("form.watch({})", js_string(&rule.source_field_id));
    match rule.operator {
        CondOperator::Eq => format!("{source} == {}", js_scalar(&rule.operand)),
        CondOperator::Ne => format!("{source} != {}", js_scalar(&rule.operand)),
        CondOperator::Gt => format!("{source} > {}", js_scalar(&rule.operand)),
        CondOperator::Lt => format!("{source} < {}", js_scalar(&rule.operand)),
        CondOperator::Ge => format!("{source} >= {}", js_scalar(&rule.operand)),
        CondOperator::Le => format!("{source} <= {}", js_scalar(&rule.operand)),
        CondOperator::Contains => format!(
            "String({source}).includes({})",
            js_string(&rule.operand.display())
        ),
        CondOperator::StartsWith => format!(
            "String({source}).startsWith({})",
            js_string(&rule.operand.display())
        ),
        CondOperator::EndsWith => format!(
            "String({source}).endsWith({})",
            js_string(&rule.operand.display())
        ),
    }
}

fn field_jsx(field: &Field) -> String {
    let mut code = String::new();
    if let Some(rule) = &field.conditional_display {
        code.push_str(&format!("      {{{} && (\n", guard_expr(rule)));
    }

    code.push_str("      <div className=\"space-y-2\">\n");
    code.push_str(&format!(
        "        <label htmlFor=\"{}\" className=\"text-sm font-medium\">{}</label>",
        field.id,
        html_escape(&field.label)
    ));
    code.push_str(&input_jsx(field));
    code.push_str(&format!(
        "\n        {{form.formState.errors.{id} && (\n          <p className=\"text-sm text-red-500\">{{form.formState.errors.{id}.message}}</p>\n        )}}\n      </div>",
        id = field.id
    ));

    if field.conditional_display.is_some() {
        code.push_str("\n      )}");
    }
    code
}

fn input_jsx(field: &Field) -> String {
    let placeholder = html_escape(field.placeholder.as_deref().unwrap_or(""));
    match field.kind {
        FieldType::Text | FieldType::Email => format!(
            "\n        <Input\n          id=\"{id}\"\n          type=\"{kind}\"\n          placeholder=\"{placeholder}\"\n          {{...form.register(\"{id}\")}}\n        />",
            id = field.id,
            kind = field.kind
        ),
        FieldType::Number => format!(
            "\n        <Input\n          id=\"{id}\"\n          type=\"number\"\n          placeholder=\"{placeholder}\"\n          {{...form.register(\"{id}\", {{ valueAsNumber: true }})}}\n        />",
            id = field.id
        ),
        FieldType::Textarea => format!(
            "\n        <Textarea\n          id=\"{id}\"\n          placeholder=\"{placeholder}\"\n          {{...form.register(\"{id}\")}}\n        />",
            id = field.id
        ),
        FieldType::Select => {
            let options = field
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|option| {
                    format!(
                        "<option value=\"{}\">{}</option>",
                        html_escape(&option.value),
                        html_escape(&option.label)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n          ");
            format!(
                "\n        <Select\n          id=\"{id}\"\n          {{...form.register(\"{id}\")}}\n        >\n          <option value=\"\">Select an option</option>\n          {options}\n        </Select>",
                id = field.id
            )
        }
        FieldType::Checkbox => format!(
            "\n        <div className=\"flex items-center gap-2\">\n          <Checkbox\n            id=\"{id}\"\n            {{...form.register(\"{id}\")}}\n          />\n          <label htmlFor=\"{id}\" className=\"text-sm font-medium\">{caption}</label>\n        </div>",
            id = field.id,
            caption = if placeholder.is_empty() {
                "Checkbox".to_string()
            } else {
                placeholder.clone()
            }
        ),
        FieldType::Radio => {
            let options = field
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|option| {
                    format!(
                        "\n          <div className=\"flex items-center gap-2\">\n            <input\n              type=\"radio\"\n              id=\"{id}-{value}\"\n              value=\"{value}\"\n              {{...form.register(\"{id}\")}}\n            />\n            <label htmlFor=\"{id}-{value}\">{label}</label>\n          </div>",
                        id = field.id,
                        value = html_escape(&option.value),
                        label = html_escape(&option.label)
                    )
                })
                .collect::<Vec<_>>()
                .join("");
            format!("\n        <RadioGroup>{options}\n        </RadioGroup>")
        }
        FieldType::Date => format!(
            "\n        <Input\n          id=\"{id}\"\n          type=\"date\"\n          {{...form.register(\"{id}\")}}\n        />",
            id = field.id
        ),
        FieldType::File => format!(
            "\n        <Input\n          id=\"{id}\"\n          type=\"file\"\n          {{...form.register(\"{id}\")}}\n        />",
            id = field.id
        ),
    }
}

fn component_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect();
    if cleaned.is_empty() || cleaned.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("Generated{cleaned}Form")
    } else {
        format!("{cleaned}Form")
    }
}
