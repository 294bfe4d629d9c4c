use crate::helpers::{spawn_app, MockClimateAccess};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use hyper::{header, Method};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn index_lists_every_route() {
    // The landing page never touches the dataset
    let climate_db = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("Available Routes:"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;/&lt;end&gt;"));
}

#[tokio::test]
async fn docs_page_is_served() {
    let climate_db = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/docs")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
}
