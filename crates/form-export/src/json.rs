use form_spec::{Field, Form};

use crate::ExportError;

/// Structural serialization of `{title, fields}` with stable key order;
/// round-trips through [`Form::from_json`] without loss.
pub fn generate(title: &str, fields: &[Field]) -> Result<String, ExportError> {
    let form = Form {
        title: title.to_string(),
        fields: fields.to_vec(),
    };
    Ok(form.to_json_pretty()?)
}
