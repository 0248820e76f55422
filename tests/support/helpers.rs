// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{HeaderMap, Request, StatusCode, header::SET_COOKIE};
use axum::response::Response;
use serde_json::Value;

use recipe_box::application::ports::{
    auth::AuthBackend,
    recipes::RecipeCatalog,
    storage::ObjectStorage,
    util::{SlugGenerator, TokenGenerator},
};
use recipe_box::application::services::ApplicationServices;
use recipe_box::infrastructure::util::DefaultSlugGenerator;
use recipe_box::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
};

use super::mocks::{DummyAuthBackend, RecordingStorage, SequentialTokens, StaticRecipes};

pub const TEST_ORIGIN: &str = "https://recipes.test";
pub const BOUNDARY: &str = "recipe-box-test-boundary";

/// Handles on the doubles behind a test router, for later inspection.
#[derive(Clone)]
pub struct TestBackends {
    pub auth: Arc<DummyAuthBackend>,
    pub storage: Arc<RecordingStorage>,
    pub recipes: Arc<StaticRecipes>,
}

impl Default for TestBackends {
    fn default() -> Self {
        Self {
            auth: Arc::new(DummyAuthBackend::new()),
            storage: Arc::new(RecordingStorage::new()),
            recipes: Arc::new(StaticRecipes::new()),
        }
    }
}

pub fn build_services(backends: &TestBackends) -> Arc<ApplicationServices> {
    let auth: Arc<dyn AuthBackend> = backends.auth.clone();
    let storage: Arc<dyn ObjectStorage> = backends.storage.clone();
    let recipes: Arc<dyn RecipeCatalog> = backends.recipes.clone();
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let tokens: Arc<dyn TokenGenerator> = Arc::new(SequentialTokens::default());

    Arc::new(ApplicationServices::new(auth, storage, recipes, slugger, tokens))
}

pub fn build_test_state(backends: &TestBackends) -> HttpState {
    HttpState {
        services: build_services(backends),
        settings: HttpSettings {
            public_origin: Some(TEST_ORIGIN.to_string()),
            cookie_secure: false,
        },
    }
}

pub fn make_test_router() -> (axum::Router, TestBackends) {
    let backends = TestBackends::default();
    (make_test_router_with(&backends), backends)
}

pub fn make_test_router_with(backends: &TestBackends) -> axum::Router {
    build_router(build_test_state(backends))
}

pub async fn to_json(resp: Response) -> (StatusCode, HeaderMap, Value) {
    let (parts, body_stream) = resp.into_parts();
    let bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (parts.status, parts.headers, json)
}

/// Assert an `ErrorResponse` body with the given status and `error` field.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    let (status, headers, json) = to_json(resp).await;
    assert_eq!(status, expected_status);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("application/json"), "unexpected content-type: {content_type}");
    assert_eq!(json["error"], expected_error);
    assert!(
        json["message"].as_str().is_some_and(|msg| !msg.is_empty()),
        "expected non-empty message field in ErrorResponse"
    );
}

/// The `Set-Cookie` header for `name`, if the response sets it.
pub fn set_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{name}=")))
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One part of a multipart body. `file` parts carry a filename and type.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}
