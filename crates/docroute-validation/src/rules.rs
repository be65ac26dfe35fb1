//! Field rule collections attached to a schema

use crate::error::{ValidationErrors, ValidationResult};
use crate::traits::ValidationRule;
use schemars::schema::{Schema, SchemaObject};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Refinement rules keyed by the field they apply to
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: BTreeMap<String, Vec<Arc<dyn ValidationRule>>>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("validated_fields", &self.get_validated_fields())
            .finish()
    }
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a field
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.push(field, rule);
        self
    }

    pub fn push<R>(&mut self, field: impl Into<String>, rule: R)
    where
        R: ValidationRule + 'static,
    {
        self.field_rules
            .entry(field.into())
            .or_default()
            .push(Arc::new(rule));
    }

    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty()
    }

    pub fn get_validated_fields(&self) -> Vec<&String> {
        self.field_rules.keys().collect()
    }

    /// Run every rule against the matching member of `value`.
    ///
    /// Absent members are checked as `null`, which the built-in rules accept.
    /// All failing fields are reported together.
    pub fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (field, rules) in &self.field_rules {
            let member = value.get(field).unwrap_or(&Value::Null);
            for rule in rules {
                if let Err(rule_errors) = rule.validate(member, field) {
                    errors.merge(rule_errors);
                }
            }
        }
        errors.into_result()
    }

    /// Write each rule's constraints into the matching property of an object schema.
    /// Properties that are references to shared definitions are left untouched.
    pub fn document(&self, schema: &mut SchemaObject) {
        if self.field_rules.is_empty() {
            return;
        }
        let properties = &mut schema.object().properties;
        for (field, rules) in &self.field_rules {
            if let Some(Schema::Object(property)) = properties.get_mut(field) {
                if property.reference.is_some() {
                    continue;
                }
                for rule in rules {
                    rule.document(property);
                }
            }
        }
    }
}
