use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::spec::field::Field;
use crate::validate::compile;
use crate::value::ValueMap;
use crate::visibility::{VisibilityMap, resolve_visibility};

/// Outcome of one full recompute pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputation {
    pub visibility: VisibilityMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Single entry point the host calls after each atomically-applied edit:
/// recomputes visibility from the fresh value map and gathers every
/// non-fatal configuration anomaly in one pass.
pub fn recompute(fields: &[Field], values: &ValueMap) -> Recomputation {
    let visibility = resolve_visibility(fields, values);

    let mut diagnostics = Vec::new();
    for field in fields {
        diagnostics.extend(compile(field).into_diagnostics());
        if let Some(rule) = &field.conditional_display
            && !fields.iter().any(|other| other.id == rule.source_field_id)
        {
            diagnostics.push(Diagnostic::UnresolvedDependency {
                field_id: field.id.clone(),
                source_id: rule.source_field_id.clone(),
            });
        }
    }

    debug!(
        fields = fields.len(),
        diagnostics = diagnostics.len(),
        "recompute pass"
    );
    Recomputation {
        visibility,
        diagnostics,
    }
}
