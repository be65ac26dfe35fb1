//! Route documentation model
//!
//! A [`RouteSpec`] is what a developer declares for one route: the schemas of its
//! request parts and response plus optional security and descriptive fields. The
//! same value drives request validation and the compiled document. A
//! [`RouteDocEntry`] pins a spec to the path and method it was registered under.

use crate::security::SecurityDeclaration;
use axum::http::Method;
use docroute_validation::{IntoSchema, SchemaRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// HTTP methods a documented route can be registered under
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
    TRACE,
}

impl HttpMethod {
    /// Lower-case name, as used for operation keys in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "get",
            HttpMethod::POST => "post",
            HttpMethod::PUT => "put",
            HttpMethod::PATCH => "patch",
            HttpMethod::DELETE => "delete",
            HttpMethod::HEAD => "head",
            HttpMethod::OPTIONS => "options",
            HttpMethod::TRACE => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => Method::GET,
            HttpMethod::POST => Method::POST,
            HttpMethod::PUT => Method::PUT,
            HttpMethod::PATCH => Method::PATCH,
            HttpMethod::DELETE => Method::DELETE,
            HttpMethod::HEAD => Method::HEAD,
            HttpMethod::OPTIONS => Method::OPTIONS,
            HttpMethod::TRACE => Method::TRACE,
        }
    }
}

/// Declared request body
#[derive(Debug, Clone)]
pub enum BodySpec {
    /// One schema, documented as `application/json`
    Single(SchemaRef),
    /// One schema per content type, in declaration order
    ByContentType(Vec<(String, SchemaRef)>),
}

impl BodySpec {
    /// Content types the body is documented under
    pub fn content_types(&self) -> Vec<&str> {
        match self {
            BodySpec::Single(_) => vec![JSON_CONTENT_TYPE],
            BodySpec::ByContentType(entries) => entries.iter().map(|(ct, _)| ct.as_str()).collect(),
        }
    }

    /// Schema registered for an exact content type (case-insensitive)
    pub fn schema_for(&self, content_type: &str) -> Option<&SchemaRef> {
        match self {
            BodySpec::Single(schema) => Some(schema),
            BodySpec::ByContentType(entries) => entries
                .iter()
                .find(|(ct, _)| ct.eq_ignore_ascii_case(content_type))
                .map(|(_, schema)| schema),
        }
    }
}

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Schemas and metadata declared for one route
#[derive(Debug, Clone, Default)]
pub struct RouteSpec {
    pub params: Option<SchemaRef>,
    pub query: Option<SchemaRef>,
    pub body: Option<BodySpec>,
    pub response: Option<SchemaRef>,
    pub security: Option<SecurityDeclaration>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    /// Explicit tags; these win over tags derived from mount paths
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl RouteSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, schema: impl IntoSchema) -> Self {
        self.params = Some(schema.into_schema());
        self
    }

    pub fn query(mut self, schema: impl IntoSchema) -> Self {
        self.query = Some(schema.into_schema());
        self
    }

    /// Single body schema
    pub fn body(mut self, schema: impl IntoSchema) -> Self {
        self.body = Some(BodySpec::Single(schema.into_schema()));
        self
    }

    /// Body schema for one content type. Repeating a content type replaces its
    /// schema; a previously declared single body is discarded.
    pub fn body_for(mut self, content_type: impl Into<String>, schema: impl IntoSchema) -> Self {
        let content_type = content_type.into();
        let schema = schema.into_schema();
        let mut entries = match self.body.take() {
            Some(BodySpec::ByContentType(entries)) => entries,
            _ => Vec::new(),
        };
        match entries
            .iter_mut()
            .find(|(ct, _)| ct.eq_ignore_ascii_case(&content_type))
        {
            Some(entry) => entry.1 = schema,
            None => entries.push((content_type, schema)),
        }
        self.body = Some(BodySpec::ByContentType(entries));
        self
    }

    pub fn response(mut self, schema: impl IntoSchema) -> Self {
        self.response = Some(schema.into_schema());
        self
    }

    pub fn security(mut self, security: SecurityDeclaration) -> Self {
        self.security = Some(security);
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// One documented route, as recorded at registration time
#[derive(Debug, Clone)]
pub struct RouteDocEntry {
    pub tags: Option<Vec<String>>,
    pub path: String,
    pub method: HttpMethod,
    pub spec: Arc<RouteSpec>,
}

impl RouteDocEntry {
    /// Entry for a verb registration. Only tags declared on the spec are kept;
    /// nothing is inferred here.
    pub fn new(path: impl Into<String>, method: HttpMethod, spec: Arc<RouteSpec>) -> Self {
        let tags = if spec.tags.is_empty() {
            None
        } else {
            Some(spec.tags.clone())
        };
        Self {
            tags,
            path: path.into(),
            method,
            spec,
        }
    }

    /// Copy of this entry as seen from a parent router mounted at `prefix`.
    ///
    /// The prefix is concatenated as-is. Existing tags win over `mount_tag`.
    pub fn prefixed(&self, prefix: &str, mount_tag: Option<&str>) -> Self {
        Self {
            tags: self
                .tags
                .clone()
                .or_else(|| mount_tag.map(|tag| vec![tag.to_string()])),
            path: format!("{}{}", prefix, self.path),
            method: self.method,
            spec: Arc::clone(&self.spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docroute_validation::{schema, JsonSchema};
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Upload {
        text: String,
    }

    #[test]
    fn test_body_for_keeps_declaration_order() {
        let spec = RouteSpec::new()
            .body_for("multipart/form-data", schema::<Upload>())
            .body_for("application/json", schema::<Upload>());

        let body = spec.body.unwrap();
        assert_eq!(body.content_types(), vec!["multipart/form-data", "application/json"]);
        assert!(body.schema_for("Application/JSON").is_some());
        assert!(body.schema_for("text/plain").is_none());
    }

    #[test]
    fn test_body_for_replaces_repeated_content_type() {
        let spec = RouteSpec::new()
            .body_for("application/json", schema::<Upload>())
            .body_for("application/json", schema::<Upload>());
        assert_eq!(spec.body.unwrap().content_types().len(), 1);
    }

    #[test]
    fn test_prefixed_entry_tags() {
        let untagged = RouteDocEntry::new("/:id", HttpMethod::GET, Arc::new(RouteSpec::new()));
        let mounted = untagged.prefixed("/users", Some("Users"));
        assert_eq!(mounted.path, "/users/:id");
        assert_eq!(mounted.tags, Some(vec!["Users".to_string()]));

        let tagged = RouteDocEntry::new(
            "/",
            HttpMethod::POST,
            Arc::new(RouteSpec::new().tag("Accounts")),
        );
        let mounted = tagged.prefixed("/users", Some("Users"));
        assert_eq!(mounted.path, "/users/");
        assert_eq!(mounted.tags, Some(vec!["Accounts".to_string()]));

        let root = untagged.prefixed("", None);
        assert_eq!(root.tags, None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::PATCH.as_str(), "patch");
        assert_eq!(HttpMethod::PATCH.to_string(), "PATCH");
        assert_eq!(Method::from(HttpMethod::TRACE), Method::TRACE);
    }
}
