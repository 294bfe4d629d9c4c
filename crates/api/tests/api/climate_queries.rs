use crate::helpers::{measurement, seeded_app, spawn_app, station, MockClimateAccess};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use climate_api::Error;
use hyper::{header, Method};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.expect("Failed to execute request.");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn precipitation_covers_exactly_the_trailing_twelve_months() {
    let test_app = seeded_app(
        &[
            // One day before the cutoff, must be excluded
            measurement("USC00519397", "2016-08-22", Some(0.5), 70.0),
            // Exactly twelve calendar months before the max date, inclusive
            measurement("USC00519397", "2016-08-23", Some(0.1), 71.0),
            measurement("USC00519397", "2017-01-05", None, 65.0),
            measurement("USC00519397", "2017-08-23", Some(2.1), 80.0),
        ],
        &[station("USC00519397")],
    )
    .await;

    let (status, json) = get_json(test_app.app, "/api/v1.0/precipitation").await;
    assert!(status.is_success());

    let report = json.as_object().unwrap();
    let dates: Vec<&String> = report.keys().collect();
    assert_eq!(dates, vec!["2016-08-23", "2017-01-05", "2017-08-23"]);

    // Missing precipitation propagates as null, not an error
    assert!(report["2017-01-05"].is_null());
    assert_eq!(report["2017-08-23"].as_f64(), Some(2.1));
}

#[tokio::test]
async fn precipitation_keeps_one_value_per_date() {
    let test_app = seeded_app(
        &[
            measurement("USC00519397", "2017-08-23", Some(0.1), 71.0),
            measurement("USC00513117", "2017-08-23", Some(0.2), 72.0),
        ],
        &[station("USC00519397"), station("USC00513117")],
    )
    .await;

    let (status, json) = get_json(test_app.app, "/api/v1.0/precipitation").await;
    assert!(status.is_success());

    let report = json.as_object().unwrap();
    assert_eq!(report.len(), 1);

    // Which row wins the merge is incidental; a single value survives
    let kept = report["2017-08-23"].as_f64().unwrap();
    assert!(kept == 0.1 || kept == 0.2);
}

#[tokio::test]
async fn precipitation_is_stable_across_calls() {
    let test_app = seeded_app(
        &[
            measurement("USC00519397", "2017-05-01", Some(0.3), 74.0),
            measurement("USC00519397", "2017-08-23", Some(0.0), 81.0),
        ],
        &[station("USC00519397")],
    )
    .await;

    let (_, first) = get_json(test_app.app.clone(), "/api/v1.0/precipitation").await;
    let (_, second) = get_json(test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn station_list_is_distinct() {
    let test_app = seeded_app(
        &[measurement("USC00519397", "2017-08-23", Some(0.1), 71.0)],
        &[
            station("USC00519397"),
            station("USC00513117"),
            // Duplicate identifier rows collapse to one entry
            station("USC00513117"),
        ],
    )
    .await;

    let (status, json) = get_json(test_app.app, "/api/v1.0/stations").await;
    assert!(status.is_success());

    let mut ids: Vec<String> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();

    assert_eq!(ids, vec!["USC00513117", "USC00519397"]);
}

#[tokio::test]
async fn tobs_returns_only_the_most_active_station() {
    let test_app = seeded_app(
        &[
            measurement("USC00519397", "2017-06-01", Some(0.0), 74.0),
            measurement("USC00519397", "2017-07-01", Some(0.1), 76.0),
            measurement("USC00519397", "2017-08-23", Some(0.2), 79.0),
            measurement("USC00513117", "2017-07-01", Some(0.4), 68.0),
        ],
        &[station("USC00519397"), station("USC00513117")],
    )
    .await;

    let (status, json) = get_json(test_app.app, "/api/v1.0/tobs").await;
    assert!(status.is_success());

    let readings = json.as_array().unwrap();
    assert_eq!(readings.len(), 3);

    let dates: Vec<&str> = readings
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2017-06-01", "2017-07-01", "2017-08-23"]);

    let temps: Vec<f64> = readings
        .iter()
        .map(|r| r["temperature"].as_f64().unwrap())
        .collect();
    assert_eq!(temps, vec![74.0, 76.0, 79.0]);
}

#[tokio::test]
async fn tobs_breaks_count_ties_by_lowest_station_identifier() {
    let test_app = seeded_app(
        &[
            measurement("USC00519397", "2017-07-01", Some(0.0), 74.0),
            measurement("USC00519397", "2017-08-23", Some(0.1), 76.0),
            measurement("USC00513117", "2017-07-01", Some(0.2), 68.0),
            measurement("USC00513117", "2017-08-23", Some(0.3), 69.0),
        ],
        &[station("USC00519397"), station("USC00513117")],
    )
    .await;

    let (status, json) = get_json(test_app.app, "/api/v1.0/tobs").await;
    assert!(status.is_success());

    let temps: Vec<f64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["temperature"].as_f64().unwrap())
        .collect();

    // USC00513117 sorts before USC00519397
    assert_eq!(temps, vec![68.0, 69.0]);
}

#[tokio::test]
async fn empty_dataset_surfaces_as_server_error() {
    let test_app = seeded_app(&[], &[]).await;

    let (status, _) = get_json(test_app.app.clone(), "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = get_json(test_app.app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn query_failures_map_to_500() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_precipitation_report()
        .times(1)
        .returning(|| Err(Error::EmptyDataset));

    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, _) = get_json(test_app.app, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
