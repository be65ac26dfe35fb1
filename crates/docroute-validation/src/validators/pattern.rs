//! Regular expression checks for string fields

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use schemars::schema::SchemaObject;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    pub message: Option<String>,
}

impl PatternValidator {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let text = match value {
            Value::Null => return Ok(()),
            Value::String(text) => text,
            _ => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for pattern validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if self.pattern.is_match(text) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} does not match the required format", field));
        Err(ValidationError::with_code(field, message, "pattern_mismatch")
            .context(serde_json::json!({ "pattern": self.pattern_string() }))
            .into())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn document(&self, schema: &mut SchemaObject) {
        schema.string().pattern = Some(self.pattern_string().to_string());
    }
}
