// Integration tests: HTTP endpoints driven in-process through the router

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use weather_dashboard::dashboard::DashboardService;
use weather_dashboard::models::{NormalizedTimestamp, StoredTimestamp};
use weather_dashboard::reading_repo::ReadingRepo;
use weather_dashboard::routes;

mod common;

const OLDER: &str = "temperature_trends_20240101_120000.png";
const NEWER: &str = "temperature_trends_20240102_090000.png";

struct TestApp {
    _dir: TempDir,
    readings: Arc<ReadingRepo>,
    app: Router,
}

async fn test_app(signing_key: Option<&str>, trend_files: &[&str]) -> TestApp {
    let dir = TempDir::new().unwrap();
    let artifacts_dir = dir.path().join("artifacts");
    std::fs::create_dir_all(&artifacts_dir).unwrap();
    for name in trend_files {
        std::fs::write(artifacts_dir.join(name), format!("png:{name}")).unwrap();
    }

    let readings = common::reading_repo(&dir).await;
    let artifacts = common::artifact_repo(&artifacts_dir, signing_key);
    let dashboard = Arc::new(
        DashboardService::new(readings.clone(), artifacts.clone(), "temperature_trends").unwrap(),
    );
    TestApp {
        _dir: dir,
        readings,
        app: routes::app(dashboard, artifacts),
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_root_endpoint() {
    let t = test_app(None, &[]).await;
    let (status, body) = get(&t.app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Weather dashboard API");
}

#[tokio::test]
async fn test_version_endpoint() {
    let t = test_app(None, &[]).await;
    let (status, json) = get_json(&t.app, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "weather-dashboard");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_current_empty_store_is_404() {
    let t = test_app(None, &[]).await;
    let (status, json) = get_json(&t.app, "/current").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({ "error": "No data found" }));
}

#[tokio::test]
async fn test_current_returns_newest_normalized() {
    let t = test_app(None, &[]).await;
    t.readings
        .insert_reading(
            &common::values(11.0),
            StoredTimestamp::Normalized(NormalizedTimestamp(1_700_000_000)),
        )
        .await
        .unwrap();
    t.readings.save_reading(&common::values(19.5)).await.unwrap();

    let (status, json) = get_json(&t.app, "/current").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["temperature"], 19.5);
    assert_eq!(json["city"], "London");
    assert_eq!(json["conditions"], "light rain");
    let ts = json["timestamp"].as_i64().expect("epoch seconds");
    assert!((ts - Utc::now().timestamp()).abs() < 60);
}

#[tokio::test]
async fn test_history_empty_is_empty_array() {
    let t = test_app(None, &[]).await;
    let (status, json) = get_json(&t.app, "/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_history_is_newest_first_and_capped() {
    let t = test_app(None, &[]).await;
    for i in 0..120 {
        t.readings
            .insert_reading(
                &common::values(i as f64),
                StoredTimestamp::Normalized(NormalizedTimestamp(1_700_000_000 + i)),
            )
            .await
            .unwrap();
    }
    let (status, json) = get_json(&t.app, "/history").await;
    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 100);
    assert_eq!(items[0]["temperature"], 119.0);
    assert_eq!(items[0]["timestamp"], 1_700_000_119i64);
}

#[tokio::test]
async fn test_average_temperature() {
    let t = test_app(None, &[]).await;
    let (status, json) = get_json(&t.app, "/average-temperature").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No data found");

    let now = Utc::now();
    for (temp, hours_ago) in [(10.0, 1), (20.0, 2), (30.0, 3), (99.0, 48)] {
        t.readings
            .insert_reading(
                &common::values(temp),
                StoredTimestamp::Native(now - Duration::hours(hours_ago)),
            )
            .await
            .unwrap();
    }
    let (status, json) = get_json(&t.app, "/average-temperature").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "average_temperature": 20.0 }));
}

#[tokio::test]
async fn test_temperature_trend_not_found() {
    let t = test_app(Some(common::TEST_SIGNING_KEY), &["unrelated.png"]).await;
    let (status, json) = get_json(&t.app, "/temperature-trend").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No temperature trend images found");
}

#[tokio::test]
async fn test_temperature_trend_picks_newest() {
    let t = test_app(Some(common::TEST_SIGNING_KEY), &[OLDER, NEWER]).await;
    let (status, json) = get_json(&t.app, "/temperature-trend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["image_name"], NEWER);
    assert_eq!(json["timestamp"], "2024-01-02T09:00:00Z");
    let url = json["image_url"].as_str().unwrap();
    assert!(url.starts_with(&format!("/artifacts/{NEWER}?expires=")), "{url}");
}

#[tokio::test]
async fn test_temperature_trend_without_signing_key_is_500() {
    let t = test_app(None, &[NEWER]).await;
    let (status, json) = get_json(&t.app, "/temperature-trend").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let msg = json["error"].as_str().unwrap();
    assert!(msg.starts_with("Failed to fetch temperature trend: "), "{msg}");
}

#[tokio::test]
async fn test_signed_artifact_download() {
    let t = test_app(Some(common::TEST_SIGNING_KEY), &[NEWER]).await;
    let (_, json) = get_json(&t.app, "/temperature-trend").await;
    let url = json["image_url"].as_str().unwrap().to_string();

    let response = t
        .app
        .clone()
        .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], format!("png:{NEWER}").as_bytes());
}

#[tokio::test]
async fn test_artifact_rejects_bad_signature() {
    let t = test_app(Some(common::TEST_SIGNING_KEY), &[NEWER]).await;
    let expires = Utc::now().timestamp() + 600;
    let uri = format!("/artifacts/{NEWER}?expires={expires}&signature={}", "0".repeat(64));
    let (status, json) = get_json(&t.app, &uri).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_artifact_gone_is_404() {
    let t = test_app(Some(common::TEST_SIGNING_KEY), &[NEWER]).await;
    let (_, json) = get_json(&t.app, "/temperature-trend").await;
    let url = json["image_url"].as_str().unwrap().to_string();

    let artifacts_dir = t._dir.path().join("artifacts");
    std::fs::remove_file(Path::new(&artifacts_dir).join(NEWER)).unwrap();
    let (status, _) = get_json(&t.app, &url).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
