use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::field::{Field, FieldOption, FieldType};

/// Failure to parse a serialized form definition.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed form definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level form definition: a title plus fields in display order.
///
/// Lives only in host memory for the duration of a session; the core never
/// retains a reference between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Form {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Mutable access for in-place settings edits.
    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    /// Appends a fresh field of the given type and returns its id.
    pub fn add_field(&mut self, kind: FieldType) -> String {
        let field = Field::new(kind);
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Removes the field with the given id; true when something was removed.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.id != id);
        self.fields.len() != before
    }

    /// Clones a field (fresh id, `(copy)` label suffix) directly after the
    /// original and returns the new id.
    pub fn duplicate_field(&mut self, id: &str) -> Option<String> {
        let index = self.fields.iter().position(|field| field.id == id)?;
        let copy = self.fields[index].duplicate();
        let copy_id = copy.id.clone();
        self.fields.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Appends `Option {n}` to a select/radio field's option list.
    pub fn add_option(&mut self, field_id: &str) -> bool {
        let Some(field) = self.field_mut(field_id) else {
            return false;
        };
        if !field.kind.has_options() {
            return false;
        }
        let options = field.options.get_or_insert_with(Vec::new);
        options.push(FieldOption::from_label(format!(
            "Option {}",
            options.len() + 1
        )));
        true
    }

    /// Serializes the form with stable key ordering.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a serialized form; the inverse of [`Form::to_json_pretty`].
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(text)?)
    }
}
