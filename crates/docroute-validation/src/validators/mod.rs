//! Built-in refinement rules

pub mod length;
pub mod numeric;
pub mod pattern;

pub use length::LengthValidator;
pub use numeric::NumericValidator;
pub use pattern::PatternValidator;

use schemars::schema::{InstanceType, SchemaObject, SingleOrVec};

/// Whether the documented schema allows the given JSON type
pub(crate) fn allows_type(schema: &SchemaObject, ty: InstanceType) -> bool {
    match &schema.instance_type {
        Some(SingleOrVec::Single(single)) => **single == ty,
        Some(SingleOrVec::Vec(types)) => types.contains(&ty),
        None => false,
    }
}
