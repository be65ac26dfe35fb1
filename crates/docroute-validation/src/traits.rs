//! Refinement rule trait

use crate::error::ValidationResult;
use schemars::schema::SchemaObject;
use serde_json::Value;

/// A check applied to one field after the value has matched its schema shape.
///
/// Rules run synchronously inside the request's validation step, and each rule
/// also writes the constraint it enforces into the field's documented schema.
pub trait ValidationRule: Send + Sync {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    fn rule_name(&self) -> &'static str;

    /// Add the rule's JSON Schema keywords (`minLength`, `pattern`, ...) to the field schema
    fn document(&self, _schema: &mut SchemaObject) {}
}
