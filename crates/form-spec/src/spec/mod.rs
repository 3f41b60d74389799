pub mod field;
pub mod form;

pub use field::{
    CondOperator, ConditionalRule, Field, FieldOption, FieldType, RuleKind, Scalar,
    ValidationRule, slugify,
};
pub use form::{Form, ParseError};
