//! Numeric range checks

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use schemars::schema::SchemaObject;
use serde_json::{json, Value};

/// Inclusive numeric bounds.
///
/// Strings are parsed as numbers, so the same rule works for JSON bodies and for
/// path or query values that arrive as text.
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer_only: bool,
    pub message: Option<String>,
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn integer_only(mut self) -> Self {
        self.integer_only = true;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn number_of(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn range_message(&self, field: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} must be between {} and {}", field, min, max),
            (Some(min), None) => format!("{} must be at least {}", field, min),
            (None, Some(max)) => format!("{} must be at most {}", field, max),
            (None, None) => format!("{} is out of range", field),
        }
    }
}

impl ValidationRule for NumericValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let number = match Self::number_of(value) {
            Some(n) if n.is_finite() => n,
            _ => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a numeric value", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if self.integer_only && number.fract() != 0.0 {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be an integer", field),
                "not_integer",
            )
            .into());
        }

        if let Some(min) = self.min {
            if number < min {
                return Err(ValidationError::with_code(
                    field,
                    self.range_message(field),
                    "below_minimum",
                )
                .context(json!({ "min": min, "actual": number }))
                .into());
            }
        }
        if let Some(max) = self.max {
            if number > max {
                return Err(ValidationError::with_code(
                    field,
                    self.range_message(field),
                    "above_maximum",
                )
                .context(json!({ "max": max, "actual": number }))
                .into());
            }
        }
        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn document(&self, schema: &mut SchemaObject) {
        let number = schema.number();
        if self.min.is_some() {
            number.minimum = self.min;
        }
        if self.max.is_some() {
            number.maximum = self.max;
        }
    }
}
