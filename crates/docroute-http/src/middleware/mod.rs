//! Request middleware

pub mod validation;

pub use validation::{request_validator, validate_request, RequestPart, Validator};

/// Request extension carrying the body size limit used while validating.
///
/// The server installs it on every request; routes served without it fall back
/// to `HttpDefaults::MAX_REQUEST_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);
