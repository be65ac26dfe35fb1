//! Users API with nested routers, bearer security and a multipart upload.
//!
//! Run with `cargo run -p docroute-http --example users_api`, then open
//! <http://127.0.0.1:9888/api-docs>.

use axum::extract::{Path, Query};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::Json;
use docroute_http::{
    init_logging, request_validator, schema, DocRouter, HttpConfig, JsonSchema, LengthValidator,
    LoggingConfig, OpenApiConfig, RouteSpec, SecurityDeclaration, Server,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize, JsonSchema)]
struct UpdateUser {
    name: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct IdParams {
    id: String,
}

#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct NewPost {
    text: String,
    image: String,
}

#[derive(Deserialize, JsonSchema)]
struct Greet {
    name: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct Greeting {
    status: bool,
    message: String,
    content: Option<Value>,
}

async fn update_user(headers: HeaderMap, Json(user): Json<UpdateUser>) -> Json<Value> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("anonymous");
    Json(json!({ "message": format!("User {} updated by {}", user.name, token) }))
}

async fn show_user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "message": format!("User {}", id) }))
}

async fn create_post() -> Json<Value> {
    Json(json!({ "message": "Post received" }))
}

async fn show_post(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "message": format!("Post {}", id) }))
}

async fn greet(Query(query): Query<Greet>) -> Json<Greeting> {
    Json(Greeting {
        status: true,
        message: format!("Hello, {}!", query.name),
        content: None,
    })
}

fn post_router() -> DocRouter {
    let upload = schema::<NewPost>()
        .rule("text", LengthValidator::new().min(1))
        .property_openapi(
            "image",
            json!({
                "type": "string",
                "format": "binary",
                "description": "The image to classify"
            }),
        );

    DocRouter::new()
        .post(
            "/",
            request_validator(RouteSpec::new().body_for("multipart/form-data", upload))
                .handler(create_post),
        )
        .get(
            "/:id",
            request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(show_post),
        )
}

fn user_router() -> DocRouter {
    DocRouter::new()
        .put(
            "/",
            request_validator(
                RouteSpec::new()
                    .body(schema::<UpdateUser>())
                    .security(SecurityDeclaration::bearer_with_format("JWT")),
            )
            .handler(update_user),
        )
        .get(
            "/:id",
            request_validator(RouteSpec::new().params(schema::<IdParams>())).handler(show_user),
        )
        .mount("/post", post_router())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::development()).map_err(|e| anyhow::anyhow!(e))?;

    let app = DocRouter::new().mount("/api/v1/user", user_router()).get(
        "/test",
        request_validator(
            RouteSpec::new()
                .query(schema::<Greet>())
                .response(schema::<Greeting>())
                .summary("Say hello"),
        )
        .handler(greet),
    );

    let openapi = OpenApiConfig::new("Test API", "1.0.0")
        .with_description("Documented routing demo")
        .add_server("http://127.0.0.1:9888", Some("Local"));

    let server = Server::new(HttpConfig::from_env()?)?;
    let handle = server.listen(app, "127.0.0.1:9888", &openapi).await?;
    tracing::info!("Docs at http://{}/api-docs", handle.local_addr());

    handle.wait().await?;
    Ok(())
}
