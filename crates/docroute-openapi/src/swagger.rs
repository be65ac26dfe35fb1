/*!
Interactive documentation for the compiled API document.

The compiled document is served as JSON and YAML next to a Swagger UI page. The
page loads the Swagger UI bundle from a CDN and points it at the JSON document.
*/

use crate::{error::OpenApiResult, specification::OpenApiSpec};
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;

/// Conventional mount path for the published document
pub const DEFAULT_DOCS_PATH: &str = "/api-docs";

#[derive(Clone)]
struct SwaggerState {
    spec: Arc<OpenApiSpec>,
    yaml: Arc<str>,
    index: Arc<str>,
}

/// Publishes one compiled document
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    spec: Arc<OpenApiSpec>,
    config: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    /// Page title, defaults to the document title
    pub title: Option<String>,
    /// Base URL of the swagger-ui-dist assets
    pub cdn_url: String,
    pub custom_css: Option<String>,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            title: None,
            cdn_url: "https://unpkg.com/swagger-ui-dist@5".to_string(),
            custom_css: None,
        }
    }
}

impl SwaggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_cdn_url(mut self, url: &str) -> Self {
        self.cdn_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_custom_css(mut self, css: &str) -> Self {
        self.custom_css = Some(css.to_string());
        self
    }
}

impl SwaggerUi {
    pub fn new(spec: OpenApiSpec, config: SwaggerConfig) -> Self {
        Self {
            spec: Arc::new(spec),
            config,
        }
    }

    pub fn specification(&self) -> &OpenApiSpec {
        &self.spec
    }

    /// Routes serving the UI page at `mount_path`, plus `{mount_path}/openapi.json`
    /// and `{mount_path}/openapi.yaml`.
    ///
    /// The returned router has no path prefix of its own; merge it into the
    /// application router.
    pub fn into_router<S>(self, mount_path: &str) -> OpenApiResult<Router<S>>
    where
        S: Clone + Send + Sync + 'static,
    {
        let base = mount_path.trim_end_matches('/');
        let json_url = format!("{}/openapi.json", base);
        let state = SwaggerState {
            yaml: Arc::from(self.spec.to_yaml()?),
            index: Arc::from(self.index_html(&json_url)),
            spec: Arc::clone(&self.spec),
        };

        let page = if base.is_empty() { "/" } else { base };
        let mut router = Router::new()
            .route(page, get(serve_index))
            .route(&json_url, get(serve_json))
            .route(&format!("{}/openapi.yaml", base), get(serve_yaml));
        if !base.is_empty() {
            router = router.route(&format!("{}/", base), get(serve_index));
        }

        Ok(router.with_state(state))
    }

    fn index_html(&self, json_url: &str) -> String {
        let title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| self.spec.info.title.clone());
        let custom_css = self.config.custom_css.as_deref().unwrap_or("");
        let cdn = &self.config.cdn_url;

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="{cdn}/swagger-ui.css" />
    <style>
        body {{ margin: 0; background: #fafafa; }}
        {custom_css}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{cdn}/swagger-ui-bundle.js"></script>
    <script src="{cdn}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: '{json_url}',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"#
        )
    }
}

async fn serve_index(State(state): State<SwaggerState>) -> Html<String> {
    Html(state.index.to_string())
}

async fn serve_json(State(state): State<SwaggerState>) -> Json<OpenApiSpec> {
    Json((*state.spec).clone())
}

async fn serve_yaml(State(state): State<SwaggerState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml")],
        state.yaml.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn swagger() -> SwaggerUi {
        SwaggerUi::new(OpenApiSpec::new("Pets", "1.0.0"), SwaggerConfig::new())
    }

    #[tokio::test]
    async fn test_serves_document_formats() {
        let router: Router = swagger().into_router(DEFAULT_DOCS_PATH).unwrap();

        let (status, json) = get_body(router.clone(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["info"]["title"], "Pets");

        let (status, yaml) = get_body(router.clone(), "/api-docs/openapi.yaml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(yaml.contains("title: Pets"));
    }

    #[tokio::test]
    async fn test_index_points_at_json() {
        let router: Router = swagger().into_router("/docs/").unwrap();

        let (status, html) = get_body(router.clone(), "/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("url: '/docs/openapi.json'"));
        assert!(html.contains("<title>Pets</title>"));

        let (status, _) = get_body(router, "/docs/").await;
        assert_eq!(status, StatusCode::OK);
    }
}
