//! Error handling for documented routers

pub mod http_error;
pub mod responses;

pub use http_error::{HttpError, HttpResult};
