//! Schema validation middleware
//!
//! [`request_validator`] turns a [`RouteSpec`] into a [`Validator`]. Attached to a
//! handler with [`Validator::handler`], it produces a documented handler: the
//! router records the spec for the API document and runs [`validate_request`] in
//! front of the handler on every request.

use super::BodyLimit;
use crate::config::HttpDefaults;
use crate::errors::{HttpError, HttpResult};
use crate::routing::Documented;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use docroute_openapi::{BodySpec, RouteSpec};
use docroute_validation::{SchemaInput, SchemaRef};
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The part of a request a schema applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPart {
    Params,
    Body,
    Query,
}

impl RequestPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPart::Params => "params",
            RequestPart::Body => "body",
            RequestPart::Query => "query",
        }
    }
}

impl fmt::Display for RequestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation unit built from a route declaration
#[derive(Debug, Clone)]
pub struct Validator {
    spec: Arc<RouteSpec>,
}

/// Build a validator for `spec`
pub fn request_validator(spec: RouteSpec) -> Validator {
    Validator {
        spec: Arc::new(spec),
    }
}

impl Validator {
    /// The declaration this validator was built from, unmodified
    pub fn doc(&self) -> &RouteSpec {
        &self.spec
    }

    pub fn spec(&self) -> Arc<RouteSpec> {
        Arc::clone(&self.spec)
    }

    /// Pair the validator with the handler it guards
    pub fn handler<H>(self, handler: H) -> Documented<H> {
        Documented::new(handler, self)
    }
}

/// Middleware checking path parameters, then the body, then the query string.
///
/// Stops at the first part that fails. Schema mismatches become
/// [`HttpError::Validation`]; unreadable input becomes a bad request.
/// Use with `axum::middleware::from_fn_with_state(spec, validate_request)`.
pub async fn validate_request(
    State(spec): State<Arc<RouteSpec>>,
    request: Request,
    next: Next,
) -> HttpResult<Response> {
    let request = check_request(&spec, request).await?;
    Ok(next.run(request).await)
}

async fn check_request(spec: &RouteSpec, request: Request) -> HttpResult<Request> {
    let (mut parts, body) = request.into_parts();

    if let Some(schema) = &spec.params {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(&mut parts, &())
            .await
            .map_err(|rejection| {
                HttpError::bad_request(format!(
                    "Unable to read path parameters: {}",
                    rejection.body_text()
                ))
            })?;
        parse_part(schema, SchemaInput::Fields(&params), RequestPart::Params)?;
    }

    let body = match &spec.body {
        Some(body_spec) => {
            let bytes = read_body(&parts, body).await?;
            check_body(body_spec, &parts, bytes.clone()).await?;
            Body::from(bytes)
        }
        None => body,
    };

    if let Some(schema) = &spec.query {
        let query = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| HttpError::bad_request(format!("Unable to read query string: {}", e)))?;
        parse_part(schema, SchemaInput::Fields(&pairs), RequestPart::Query)?;
    }

    Ok(Request::from_parts(parts, body))
}

fn parse_part(schema: &SchemaRef, input: SchemaInput<'_>, part: RequestPart) -> HttpResult<()> {
    schema.parse(input).map_err(|errors| {
        debug!(part = %part, fields = errors.len(), "Request failed validation");
        HttpError::validation(part, errors)
    })
}

async fn read_body(parts: &Parts, body: Body) -> HttpResult<Bytes> {
    let limit = parts
        .extensions
        .get::<BodyLimit>()
        .map(|limit| limit.0)
        .unwrap_or(HttpDefaults::MAX_REQUEST_SIZE);

    axum::body::to_bytes(body, limit).await.map_err(|err| {
        let inner = err.into_inner();
        if inner.is::<LengthLimitError>() {
            HttpError::RequestTooLarge { limit }
        } else {
            HttpError::bad_request(format!("Unable to read request body: {}", inner))
        }
    })
}

/// Media type without parameters, lower-cased
fn content_type(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .filter(|essence| !essence.is_empty())
}

/// Pick the schema for the request's content type and parse the body with it.
///
/// A single schema accepts JSON, urlencoded and multipart bodies. A per-content-type
/// declaration only accepts the content types it lists; a missing header is read
/// as JSON.
async fn check_body(body_spec: &BodySpec, parts: &Parts, bytes: Bytes) -> HttpResult<()> {
    let content_type = content_type(parts).unwrap_or_else(|| "application/json".to_string());

    let schema = match body_spec {
        BodySpec::Single(schema) => schema,
        BodySpec::ByContentType(_) => body_spec
            .schema_for(&content_type)
            .ok_or_else(|| HttpError::unsupported_media_type(content_type.clone()))?,
    };

    match content_type.as_str() {
        "application/x-www-form-urlencoded" => {
            let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
                .map_err(|e| HttpError::bad_request(format!("Malformed form body: {}", e)))?;
            parse_part(schema, SchemaInput::Fields(&fields), RequestPart::Body)
        }
        "multipart/form-data" => {
            let fields = multipart_fields(parts, bytes).await?;
            parse_part(schema, SchemaInput::Fields(&fields), RequestPart::Body)
        }
        ct if ct == "application/json" || ct.ends_with("+json") => {
            let value = if bytes.iter().all(u8::is_ascii_whitespace) {
                Value::Object(Default::default())
            } else {
                serde_json::from_slice::<Value>(&bytes)
                    .map_err(|e| HttpError::bad_request(format!("Malformed JSON body: {}", e)))?
            };
            parse_part(schema, SchemaInput::Json(&value), RequestPart::Body)
        }
        other => Err(HttpError::unsupported_media_type(other)),
    }
}

/// Text fields of a multipart body. File fields contribute their file name.
async fn multipart_fields(parts: &Parts, bytes: Bytes) -> HttpResult<Vec<(String, String)>> {
    let header = parts
        .headers
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("multipart/form-data"));
    let request = Request::builder()
        .header(CONTENT_TYPE, header)
        .body(Body::from(bytes))
        .map_err(|e| HttpError::internal(e.to_string()))?;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpError::bad_request(format!("Malformed multipart body: {}", e.body_text()))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let value = match file_name {
            Some(file_name) => file_name,
            None => field.text().await.map_err(|e| {
                HttpError::bad_request(format!("Malformed multipart field: {}", e.body_text()))
            })?,
        };
        fields.push((name, value));
    }
    Ok(fields)
}
