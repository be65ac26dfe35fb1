//! # docroute-validation
//!
//! Request schemas for docroute. A single schema value both validates an incoming
//! request part at runtime (`Schema::parse`) and describes itself as JSON Schema
//! for the compiled API document (`Schema::json_schema`).

pub mod error;
pub mod rules;
pub mod schema;
pub mod traits;
pub mod validators;

pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use rules::Rules;
pub use schema::{schema, IntoSchema, Schema, SchemaInput, SchemaRef, TypedSchema};
pub use traits::ValidationRule;

pub use validators::{
    length::LengthValidator,
    numeric::NumericValidator,
    pattern::PatternValidator,
};

// Schema derive and generator types, re-exported so route declarations need one import.
pub use schemars::{gen::SchemaGenerator, schema::SchemaObject, JsonSchema};
