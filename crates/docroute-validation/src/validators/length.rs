//! Length limits for strings and arrays

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use schemars::schema::{InstanceType, SchemaObject};
use serde_json::Value;

use super::allows_type;

/// Inclusive length limits; strings are measured in characters
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub message: Option<String>,
}

impl LengthValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn exact(self, length: usize) -> Self {
        self.range(length, length)
    }

    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn length_of(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    fn error_message(&self, field: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => {
                format!("{} must be exactly {} characters long", field, min)
            }
            (Some(min), Some(max)) => {
                format!("{} must be between {} and {} characters long", field, min, max)
            }
            (Some(min), None) => format!("{} must be at least {} characters long", field, min),
            (None, Some(max)) => format!("{} must be at most {} characters long", field, max),
            (None, None) => format!("{} has an invalid length", field),
        }
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let Some(length) = Self::length_of(value) else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a string or array for length validation", field),
                "invalid_type",
            )
            .into());
        };

        if let Some(min) = self.min {
            if length < min {
                return Err(
                    ValidationError::with_code(field, self.error_message(field), "length_min")
                        .into(),
                );
            }
        }
        if let Some(max) = self.max {
            if length > max {
                return Err(
                    ValidationError::with_code(field, self.error_message(field), "length_max")
                        .into(),
                );
            }
        }
        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn document(&self, schema: &mut SchemaObject) {
        let min = self.min.and_then(|v| u32::try_from(v).ok());
        let max = self.max.and_then(|v| u32::try_from(v).ok());
        if allows_type(schema, InstanceType::Array) {
            let array = schema.array();
            array.min_items = min.or(array.min_items);
            array.max_items = max.or(array.max_items);
        } else {
            let string = schema.string();
            string.min_length = min.or(string.min_length);
            string.max_length = max.or(string.max_length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_bounds() {
        let validator = LengthValidator::new().range(2, 5);

        assert!(validator.validate(&json!("abc"), "name").is_ok());
        assert!(validator.validate(&json!("ñandú"), "name").is_ok());

        let short = validator.validate(&json!("a"), "name").unwrap_err();
        let error = &short.get_field_errors("name").unwrap()[0];
        assert_eq!(error.code, "length_min");
        assert_eq!(error.message, "name must be between 2 and 5 characters long");

        let long = validator.validate(&json!("abcdef"), "name").unwrap_err();
        assert_eq!(long.get_field_errors("name").unwrap()[0].code, "length_max");
    }

    #[test]
    fn test_arrays_and_other_types() {
        let validator = LengthValidator::new().min(1);

        assert!(validator.validate(&json!([1]), "tags").is_ok());
        assert!(validator.validate(&json!([]), "tags").is_err());
        assert!(validator.validate(&Value::Null, "tags").is_ok());

        let wrong = validator.validate(&json!(7), "tags").unwrap_err();
        assert_eq!(wrong.get_field_errors("tags").unwrap()[0].code, "invalid_type");
    }

    #[test]
    fn test_documents_array_items() {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::Array.into()),
            ..Default::default()
        };
        LengthValidator::new().max(3).document(&mut schema);

        let array = schema.array.expect("array validation");
        assert_eq!(array.max_items, Some(3));
        assert!(schema.string.is_none());
    }
}
