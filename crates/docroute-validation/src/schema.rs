//! Request part schemas
//!
//! A [`Schema`] is the one description of a request part (path parameters, query
//! string, body or response). The HTTP layer calls [`Schema::parse`] on every request
//! and the document compiler calls [`Schema::json_schema`] once at bind time.

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::rules::Rules;
use crate::traits::ValidationRule;
use schemars::gen::SchemaGenerator;
use schemars::schema::SchemaObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The raw value handed to a schema
#[derive(Debug, Clone, Copy)]
pub enum SchemaInput<'a> {
    /// A decoded JSON document
    Json(&'a Value),
    /// Text name/value pairs: path parameters, query strings and form bodies.
    /// Values are coerced to the declared field types while parsing.
    Fields(&'a [(String, String)]),
}

pub trait Schema: Send + Sync {
    /// Check the input against the schema, failing with every problem found
    fn parse(&self, input: SchemaInput<'_>) -> ValidationResult<()>;

    /// The JSON Schema for this part. Named types nested inside it are written to
    /// the generator's definitions and referenced from the returned object.
    fn json_schema(&self, gen: &mut SchemaGenerator) -> SchemaObject;

    fn name(&self) -> String;
}

pub type SchemaRef = Arc<dyn Schema>;

impl fmt::Debug for dyn Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema({})", self.name())
    }
}

/// Conversion into a shared schema, so route declarations accept builders directly
pub trait IntoSchema {
    fn into_schema(self) -> SchemaRef;
}

impl IntoSchema for SchemaRef {
    fn into_schema(self) -> SchemaRef {
        self
    }
}

/// Schema backed by a Rust type: serde decides what parses and schemars what gets
/// documented.
pub struct TypedSchema<T> {
    rules: Rules,
    description: Option<String>,
    openapi: Option<Value>,
    property_openapi: Vec<(String, Value)>,
    _type: PhantomData<fn() -> T>,
}

/// Start a schema for `T`
///
/// ```
/// use docroute_validation::{schema, JsonSchema, LengthValidator};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct CreateUser {
///     name: String,
/// }
///
/// let body = schema::<CreateUser>()
///     .describe("A new user")
///     .rule("name", LengthValidator::new().min(1));
/// ```
pub fn schema<T>() -> TypedSchema<T>
where
    T: DeserializeOwned + JsonSchema + 'static,
{
    TypedSchema {
        rules: Rules::new(),
        description: None,
        openapi: None,
        property_openapi: Vec::new(),
        _type: PhantomData,
    }
}

impl<T> TypedSchema<T>
where
    T: DeserializeOwned + JsonSchema + 'static,
{
    /// Refine a field with an additional rule
    pub fn rule<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules.push(field, rule);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge extra keywords into the documented schema (e.g. `example`)
    pub fn openapi(mut self, extra: Value) -> Self {
        self.openapi = Some(extra);
        self
    }

    /// Replace the documented schema of one property.
    ///
    /// Multipart file fields parse as their file name but are documented as
    /// `{"type": "string", "format": "binary"}`.
    pub fn property_openapi(mut self, field: impl Into<String>, documented: Value) -> Self {
        self.property_openapi.push((field.into(), documented));
        self
    }

    pub fn build(self) -> SchemaRef {
        Arc::new(self)
    }

    fn apply_overrides(&self, object: SchemaObject) -> SchemaObject {
        if self.openapi.is_none() && self.property_openapi.is_empty() {
            return object;
        }
        let Ok(mut value) = serde_json::to_value(&object) else {
            return object;
        };
        if let Some(extra) = &self.openapi {
            merge_json(&mut value, extra);
        }
        for (field, documented) in &self.property_openapi {
            if let Some(properties) = value.get_mut("properties").and_then(Value::as_object_mut) {
                properties.insert(field.clone(), documented.clone());
            }
        }
        serde_json::from_value(value).unwrap_or(object)
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + JsonSchema + 'static,
{
    fn parse(&self, input: SchemaInput<'_>) -> ValidationResult<()> {
        match input {
            SchemaInput::Json(value) => {
                serde_json::from_value::<T>(value.clone())
                    .map_err(|e| deserialize_error(&e.to_string()))?;
                self.rules.validate_value(value)
            }
            SchemaInput::Fields(pairs) => {
                let encoded = serde_urlencoded::to_string(pairs)
                    .map_err(|e| deserialize_error(&e.to_string()))?;
                serde_urlencoded::from_str::<T>(&encoded)
                    .map_err(|e| deserialize_error(&e.to_string()))?;
                if self.rules.is_empty() {
                    return Ok(());
                }
                let object = pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect::<serde_json::Map<_, _>>();
                self.rules.validate_value(&Value::Object(object))
            }
        }
    }

    fn json_schema(&self, gen: &mut SchemaGenerator) -> SchemaObject {
        let mut object = T::json_schema(gen).into_object();
        if let Some(description) = &self.description {
            object.metadata().description = Some(description.clone());
        }
        self.rules.document(&mut object);
        self.apply_overrides(object)
    }

    fn name(&self) -> String {
        T::schema_name()
    }
}

impl<T> IntoSchema for TypedSchema<T>
where
    T: DeserializeOwned + JsonSchema + 'static,
{
    fn into_schema(self) -> SchemaRef {
        Arc::new(self)
    }
}

/// Map a serde failure onto the field it names.
///
/// serde reports missing, unknown and duplicate members as "... field `name` ...";
/// type mismatches carry no field name and are reported against `value`.
fn deserialize_error(message: &str) -> ValidationErrors {
    let code = if message.starts_with("missing field") {
        "missing_field"
    } else if message.starts_with("unknown field") {
        "unknown_field"
    } else if message.starts_with("duplicate field") {
        "duplicate_field"
    } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
        "invalid_type"
    } else {
        "invalid_format"
    };

    let field = match code {
        "missing_field" | "unknown_field" | "duplicate_field" => message
            .split('`')
            .nth(1)
            .unwrap_or("value"),
        _ => "value",
    };

    ValidationError::with_code(field, message, code).into()
}

fn merge_json(target: &mut Value, extra: &Value) {
    match (target, extra) {
        (Value::Object(target), Value::Object(extra)) => {
            for (key, value) in extra {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, extra) => *target = extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{LengthValidator, NumericValidator};
    use schemars::gen::SchemaSettings;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct NewWidget {
        name: String,
        quantity: u32,
        colour: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct WidgetPath {
        id: u64,
    }

    fn generator() -> SchemaGenerator {
        SchemaSettings::openapi3().into_generator()
    }

    #[test]
    fn test_json_parse_reports_missing_field() {
        let widget = schema::<NewWidget>();

        assert!(widget
            .parse(SchemaInput::Json(&json!({"name": "bolt", "quantity": 3})))
            .is_ok());

        let errors = widget
            .parse(SchemaInput::Json(&json!({"name": "bolt"})))
            .unwrap_err();
        let error = &errors.get_field_errors("quantity").unwrap()[0];
        assert_eq!(error.code, "missing_field");
    }

    #[test]
    fn test_type_mismatch_is_reported_against_value() {
        let errors = schema::<NewWidget>()
            .parse(SchemaInput::Json(&json!({"name": "bolt", "quantity": "many"})))
            .unwrap_err();
        assert_eq!(errors.get_field_errors("value").unwrap()[0].code, "invalid_type");
    }

    #[test]
    fn test_fields_are_coerced() {
        let path = schema::<WidgetPath>();

        let ok = vec![("id".to_string(), "42".to_string())];
        assert!(path.parse(SchemaInput::Fields(&ok)).is_ok());

        let bad = vec![("id".to_string(), "forty-two".to_string())];
        assert!(path.parse(SchemaInput::Fields(&bad)).is_err());

        let extra = vec![
            ("id".to_string(), "1".to_string()),
            ("sort".to_string(), "asc".to_string()),
        ];
        let errors = path.parse(SchemaInput::Fields(&extra)).unwrap_err();
        assert_eq!(errors.get_field_errors("sort").unwrap()[0].code, "unknown_field");
    }

    #[test]
    fn test_rules_run_after_shape_check() {
        let widget = schema::<NewWidget>()
            .rule("name", LengthValidator::new().min(3))
            .rule("quantity", NumericValidator::new().max(10.0));

        let errors = widget
            .parse(SchemaInput::Json(&json!({"name": "ab", "quantity": 11})))
            .unwrap_err();
        assert!(errors.has_field_errors("name"));
        assert!(errors.has_field_errors("quantity"));

        let path = schema::<WidgetPath>().rule("id", NumericValidator::new().min(1.0));
        let zero = vec![("id".to_string(), "0".to_string())];
        assert!(path.parse(SchemaInput::Fields(&zero)).is_err());
    }

    #[test]
    fn test_json_schema_carries_metadata_and_rules() {
        let widget = schema::<NewWidget>()
            .describe("A widget to create")
            .rule("name", LengthValidator::new().max(40))
            .openapi(json!({"example": {"name": "bolt", "quantity": 1}}))
            .property_openapi("colour", json!({"type": "string", "format": "binary"}));

        let mut gen = generator();
        let object = widget.json_schema(&mut gen);
        let value = serde_json::to_value(&object).unwrap();

        assert_eq!(value["description"], "A widget to create");
        assert_eq!(value["properties"]["name"]["maxLength"], 40);
        assert_eq!(value["properties"]["colour"]["format"], "binary");
        assert_eq!(value["example"]["name"], "bolt");
        assert_eq!(value["required"], json!(["name", "quantity"]));
        assert_eq!(widget.name(), "NewWidget");
    }
}
