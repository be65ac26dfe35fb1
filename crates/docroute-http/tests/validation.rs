//! Request validation through documented handlers

use axum::body::Body;
use axum::extract::Path;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::response::Response;
use axum::{Json, Router};
use docroute_http::{
    request_validator, schema, DocRouter, HttpConfig, JsonSchema, LengthValidator,
    NumericValidator, OpenApiConfig, RouteSpec, Server,
};
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
struct CreateUser {
    name: String,
    email: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct IdParams {
    id: u64,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct Paging {
    page: u32,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct Upload {
    title: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct Post {
    title: String,
    image: String,
}

async fn ok() -> &'static str {
    "ok"
}

async fn echo_user(Json(user): Json<CreateUser>) -> Json<CreateUser> {
    Json(user)
}

async fn show(Path(id): Path<u64>) -> String {
    format!("user {}", id)
}

fn user_spec() -> RouteSpec {
    RouteSpec::new().body(schema::<CreateUser>().rule("name", LengthValidator::new().min(2)))
}

fn app(router: DocRouter) -> Router {
    router
        .into_app(&OpenApiConfig::new("Validation", "1.0.0"))
        .unwrap()
        .into_router()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_dispatch_is_unchanged_by_documentation() {
    let plain = app(DocRouter::new().get("/users/:id", show));
    let documented = app(DocRouter::new().get(
        "/users/:id",
        request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(show),
    ));

    for router in [plain, documented] {
        let response = router.clone().oneshot(get("/users/7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "user 7");

        let missing = router.oneshot(get("/accounts/7")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_invalid_body_never_reaches_handler() {
    let called = Arc::new(AtomicBool::new(false));
    let handler = {
        let called = Arc::clone(&called);
        move || {
            let called = Arc::clone(&called);
            async move {
                called.store(true, Ordering::SeqCst);
                "created"
            }
        }
    };
    let router = app(
        DocRouter::new().post("/users", request_validator(user_spec()).handler(handler)),
    );

    let response = router
        .oneshot(json_request(Method::POST, "/users", json!({"name": "Ada"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["location"], "body");
    assert_eq!(body["error"]["fields"]["email"][0]["code"], "missing_field");
    assert!(!called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_rules_refine_body_schema() {
    let router = app(
        DocRouter::new().post("/users", request_validator(user_spec()).handler(echo_user)),
    );

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "A", "email": "a@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["fields"]["name"][0]["code"], "length_min");
}

#[tokio::test]
async fn test_valid_body_reaches_handler_intact() {
    let router = app(
        DocRouter::new().post("/users", request_validator(user_spec()).handler(echo_user)),
    );

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Ada", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"name": "Ada", "email": "ada@example.com"})
    );
}

#[tokio::test]
async fn test_invalid_path_params_are_rejected() {
    let router = app(DocRouter::new().get(
        "/users/:id",
        request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(show),
    ));

    let response = router.oneshot(get("/users/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["location"], "params");
}

#[tokio::test]
async fn test_query_is_validated() {
    let spec = RouteSpec::new()
        .query(schema::<Paging>().rule("page", NumericValidator::new().min(1.0)));
    let router = app(DocRouter::new().get("/items", request_validator(spec).handler(ok)));

    let missing = router.clone().oneshot(get("/items")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(missing).await;
    assert_eq!(body["error"]["location"], "query");
    assert_eq!(body["error"]["fields"]["page"][0]["code"], "missing_field");

    let below = router.clone().oneshot(get("/items?page=0")).await.unwrap();
    assert_eq!(below.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(below).await["error"]["fields"]["page"][0]["code"],
        "below_minimum"
    );

    let valid = router.oneshot(get("/items?page=2")).await.unwrap();
    assert_eq!(valid.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_params_are_checked_before_body() {
    let spec = RouteSpec::new()
        .params(schema::<IdParams>())
        .body(schema::<CreateUser>());
    let router = app(DocRouter::new().put("/users/:id", request_validator(spec).handler(ok)));

    let response = router
        .oneshot(json_request(Method::PUT, "/users/abc", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["location"], "params");
}

#[tokio::test]
async fn test_body_is_validated_by_content_type() {
    let spec = RouteSpec::new()
        .body_for("application/json", schema::<Upload>())
        .body_for("application/x-www-form-urlencoded", schema::<Upload>());
    let router = app(DocRouter::new().post("/uploads", request_validator(spec).handler(ok)));

    let json = router
        .clone()
        .oneshot(json_request(Method::POST, "/uploads", json!({"title": "Notes"})))
        .await
        .unwrap();
    assert_eq!(json.status(), StatusCode::OK);

    let form = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/uploads")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
                .body(Body::from("title=Notes"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(form.status(), StatusCode::OK);

    let empty_form = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/uploads")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("other=1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(empty_form.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let text = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/uploads")
                .header(CONTENT_TYPE, "text/plain")
                .body(Body::from("title=Notes"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(text.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_multipart_file_fields_parse_as_file_name() {
    let spec = RouteSpec::new().body(schema::<Post>());
    let router = app(DocRouter::new().post("/posts", request_validator(spec).handler(ok)));

    let multipart = |body: &'static str| {
        Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body.replace('\n', "\r\n")))
            .unwrap()
    };

    let complete = "--XBOUNDARY
Content-Disposition: form-data; name=\"title\"

Holiday
--XBOUNDARY
Content-Disposition: form-data; name=\"image\"; filename=\"beach.png\"
Content-Type: image/png

PNGDATA
--XBOUNDARY--
";
    let response = router.clone().oneshot(multipart(complete)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let without_title = "--XBOUNDARY
Content-Disposition: form-data; name=\"image\"; filename=\"beach.png\"
Content-Type: image/png

PNGDATA
--XBOUNDARY--
";
    let response = router.oneshot(multipart(without_title)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"]["fields"]["title"][0]["code"],
        "missing_field"
    );
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let router = app(
        DocRouter::new().post("/users", request_validator(user_spec()).handler(ok)),
    );

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let router = DocRouter::new().post("/users", request_validator(user_spec()).handler(ok));
    let server = Server::new(HttpConfig::default().with_max_request_size(16)).unwrap();
    let app = server
        .bind(router, &OpenApiConfig::new("Limits", "1.0.0"))
        .unwrap()
        .into_router();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Ada Lovelace", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
