pub mod expression;
pub mod field_path;
pub mod issues;
pub mod properties;
pub mod stable_hash;
pub mod stable_json;

pub use expression::{contains_deferred_expression, deferred_expressions, DeferredExpression};
pub use field_path::{FieldPath, FieldPathSegment};
pub use issues::{IssueSeverity, StructuredIssue};
pub use properties::{
    parse_properties, write_properties, PropertiesDocument, PropertiesParseError,
};
pub use stable_hash::stable_hash_hex;
pub use stable_json::stable_json_bytes;
