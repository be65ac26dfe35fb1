//! Documentation captured through routers and compiled at bind time

use axum::body::Body;
use axum::http::{Request, StatusCode};
use docroute_http::{
    request_validator, schema, DocRouter, HttpConfig, HttpError, HttpMethod, JsonSchema,
    OpenApiConfig, OpenApiError, RouteDocEntry, RouteDocs, RouteSpec, SecurityDeclaration, Server,
};
use docroute_openapi::OpenApiGenerator;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct IdParams {
    id: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct UpdateUser {
    name: String,
    email: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct Upload {
    title: String,
}

async fn ok() -> &'static str {
    "ok"
}

fn config() -> OpenApiConfig {
    OpenApiConfig::new("Test API", "1.0.0")
}

fn document(router: &DocRouter) -> Value {
    serde_json::to_value(router.compile(&config()).unwrap()).unwrap()
}

#[test]
fn test_single_route_document() {
    let router = DocRouter::new().get(
        "/widgets/:id",
        request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(ok),
    );

    let doc = document(&router);
    let operation = &doc["paths"]["/widgets/{id}"]["get"];
    assert_eq!(operation["parameters"][0]["name"], "id");
    assert_eq!(operation["parameters"][0]["in"], "path");
    assert_eq!(operation["parameters"][0]["required"], true);
    assert_eq!(operation["responses"]["200"]["description"], "Successful response");
    assert!(operation.get("tags").is_none());
}

#[test]
fn test_mounted_route_is_prefixed_and_tagged() {
    let users = DocRouter::new().get(
        "/:id",
        request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(ok),
    );
    let app = DocRouter::new().mount("/users", users);

    let doc = document(&app);
    let operation = &doc["paths"]["/users/{id}"]["get"];
    assert_eq!(operation["tags"], json!(["Users"]));
    assert_eq!(doc["tags"], json!([{"name": "Users"}]));
}

#[test]
fn test_bearer_security_is_registered() {
    let router = DocRouter::new().put(
        "/",
        request_validator(
            RouteSpec::new()
                .body(schema::<UpdateUser>())
                .security(SecurityDeclaration::bearer_with_format("JWT")),
        )
        .handler(ok),
    );

    let doc = document(&router);
    assert_eq!(
        doc["components"]["securitySchemes"]["defaultAuth"],
        json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"})
    );
    assert_eq!(doc["paths"]["/"]["put"]["security"], json!([{"defaultAuth": []}]));
    assert!(doc["paths"]["/"]["put"]["requestBody"]["content"]["application/json"].is_object());
}

#[test]
fn test_unsupported_security_aborts_bind() {
    let router = DocRouter::new().get(
        "/private",
        request_validator(RouteSpec::new().security(SecurityDeclaration::custom("oauth")))
            .handler(ok),
    );

    let server = Server::new(HttpConfig::default()).unwrap();
    let result = server.bind(router, &config());
    assert!(matches!(
        result,
        Err(HttpError::Documentation(OpenApiError::UnsupportedSecurityType { .. }))
    ));
}

#[test]
fn test_body_per_content_type_is_documented() {
    let router = DocRouter::new().post(
        "/upload",
        request_validator(
            RouteSpec::new()
                .body_for("application/json", schema::<Upload>())
                .body_for("multipart/form-data", schema::<Upload>()),
        )
        .handler(ok),
    );

    let doc = document(&router);
    let content = doc["paths"]["/upload"]["post"]["requestBody"]["content"]
        .as_object()
        .unwrap();
    let mut types: Vec<&String> = content.keys().collect();
    types.sort();
    assert_eq!(types, vec!["application/json", "multipart/form-data"]);
}

#[test]
fn test_nested_mounts_keep_innermost_tag() {
    let posts = DocRouter::new().post(
        "/",
        request_validator(RouteSpec::new().body(schema::<Upload>())).handler(ok),
    );
    let users = DocRouter::new()
        .get(
            "/:id",
            request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(ok),
        )
        .mount("/post", posts);
    let app = DocRouter::new().mount("/api/v1/user", users);

    let doc = document(&app);
    assert_eq!(doc["paths"]["/api/v1/user/{id}"]["get"]["tags"], json!(["User"]));
    assert_eq!(doc["paths"]["/api/v1/user/post/"]["post"]["tags"], json!(["Post"]));
}

#[test]
fn test_declared_tags_win_over_mount_tag() {
    let users = DocRouter::new().get(
        "/me",
        request_validator(RouteSpec::new().tag("Profile")).handler(ok),
    );
    let app = DocRouter::new().mount("/users", users);

    let doc = document(&app);
    assert_eq!(doc["paths"]["/users/me"]["get"]["tags"], json!(["Profile"]));
}

#[test]
fn test_root_mount_adds_no_tag() {
    let child = DocRouter::new().get("/status", request_validator(RouteSpec::new()).handler(ok));
    let app: DocRouter = DocRouter::new().mount("/", child);

    let entries = app.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "//status");
    assert_eq!(entries[0].tags, None);
}

#[test]
fn test_same_router_mounted_twice_is_documented_twice() {
    let child = DocRouter::new().get("/", request_validator(RouteSpec::new()).handler(ok));
    let app = DocRouter::new()
        .mount("/left", child.clone())
        .mount("/right", child);

    let doc = document(&app);
    assert_eq!(doc["paths"]["/left/"]["get"]["tags"], json!(["Left"]));
    assert_eq!(doc["paths"]["/right/"]["get"]["tags"], json!(["Right"]));
}

#[test]
fn test_plain_and_multi_path_routes_are_not_documented() {
    let router = DocRouter::new()
        .get("/plain", ok)
        .get(["/a", "/b"], request_validator(RouteSpec::new()).handler(ok));

    let doc = document(&router);
    assert_eq!(doc["paths"], json!({}));
}

#[test]
fn test_duplicate_operation_is_rejected() {
    let spec = Arc::new(RouteSpec::new());
    let mut docs = RouteDocs::new();
    docs.push_route(RouteDocEntry::new("/items/:id", HttpMethod::GET, Arc::clone(&spec)));

    let mut other = RouteDocs::new();
    other.push_route(RouteDocEntry::new("/:id", HttpMethod::GET, spec));
    docs.push_mount("/items", other);

    let result = OpenApiGenerator::new(config()).generate(&docs.flatten());
    assert!(matches!(
        result,
        Err(OpenApiError::DuplicateOperation { .. })
    ));
}

#[tokio::test]
async fn test_bound_app_publishes_document() {
    let router: DocRouter = DocRouter::new().get(
        "/widgets/:id",
        request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(ok),
    );
    let app = router.into_app(&config()).unwrap();
    assert_eq!(app.spec.operation_count(), 1);

    let response = app
        .into_router()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/widgets/{id}"]["get"].is_object());
}

#[tokio::test]
async fn test_docs_path_follows_config() {
    let router = DocRouter::new().get("/health", request_validator(RouteSpec::new()).handler(ok));
    let server = Server::new(HttpConfig::default().with_docs_path("/reference")).unwrap();
    let app = server.bind(router, &config()).unwrap();

    let response = app
        .into_router()
        .oneshot(Request::builder().uri("/reference").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
