use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt as _;

mod support;

use support::{make_test_router, to_json};

#[tokio::test]
async fn health_reports_ok() {
    let (app, _backends) = make_test_router();

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _headers, json) = to_json(app.oneshot(req).await.unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let (app, _backends) = make_test_router();

    let req = Request::builder().uri("/openapi.json").body(Body::empty()).unwrap();
    let (status, _headers, json) = to_json(app.oneshot(req).await.unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let paths = json["paths"].as_object().expect("paths object");
    for path in [
        "/auth",
        "/auth/callback",
        "/api/images",
        "/api/images/{key}",
        "/api/layout",
        "/health",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(json["components"]["schemas"]["PageDataDto"].is_object());
}
