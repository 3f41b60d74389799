#![allow(missing_docs)]

pub mod diagnostics;
pub mod recompute;
pub mod schema;
pub mod spec;
pub mod validate;
pub mod value;
pub mod visibility;

pub use diagnostics::Diagnostic;
pub use recompute::{Recomputation, recompute};
pub use schema::submission_schema;
pub use spec::{
    CondOperator, ConditionalRule, Field, FieldOption, FieldType, Form, ParseError, RuleKind,
    Scalar, ValidationRule, slugify,
};
pub use validate::{CompiledConstraint, ValidationError, ValidationResult, compile, validate};
pub use value::{FieldValue, ValueMap, loose_cmp, loose_eq};
pub use visibility::{VisibilityMap, resolve_visibility};
