//! HTTP API tests
//!
//! Drives the full router in-process with live weather and satellite lookups
//! disabled, so every request is answered from the reference tables.

use agri_advisor_backend::{create_app, AppState, Config};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn offline_app() -> Router {
    let mut config = Config::default();
    config.weather.api_key = String::new();
    config.satellite.enabled = false;

    let state = AppState::new(config).expect("builtin reference data is valid");
    create_app(state)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = offline_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, payload: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

// ============================================================================
// Health and reference listings
// ============================================================================

#[tokio::test]
async fn test_root_and_plain_health() {
    let response = offline_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_api_health_reports_offline_sources() {
    let (status, body) = get("/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["predictor"], "rule-based");
    assert_eq!(body["crops"], 14);
    assert_eq!(body["states"], 18);
    assert_eq!(body["live_weather"], false);
    assert_eq!(body["satellite_data"], false);
}

#[tokio::test]
async fn test_reference_listings() {
    let (status, body) = get("/api/v1/reference/states").await;
    assert_eq!(status, StatusCode::OK);
    let states = body["states"].as_array().unwrap();
    assert_eq!(states.len(), 18);
    assert!(states.iter().any(|s| s["name"] == "Punjab" && s["city"] == "Chandigarh"));

    let (status, body) = get("/api/v1/reference/seasons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seasons"].as_array().unwrap().len(), 3);

    let (status, body) = get("/api/v1/reference/water-levels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["water_levels"], json!(["Low", "Medium", "High"]));

    let (status, body) = get("/api/v1/reference/soil-types").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["soil_types"].as_array().unwrap().is_empty());

    let (status, body) = get("/api/v1/reference/crops").await;
    assert_eq!(status, StatusCode::OK);
    let crops = body["crops"].as_array().unwrap();
    assert_eq!(crops.len(), 14);
    assert!(crops.iter().any(|c| c["id"] == "rice" && c["name"] == "Rice"));
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_recommend_wheat_in_punjab_rabi() {
    let (status, body) = post(
        "/api/v1/recommendations",
        json!({
            "state": "Punjab",
            "season": "Rabi",
            "soil_type": "Loamy",
            "water_availability": "Medium",
            "ph": 6.5,
            "use_live_weather": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["weather_source"], "none");
    assert_eq!(body["total_crops_evaluated"], 14);
    assert!(body.get("weather").is_none());

    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(!recommendations.is_empty());
    assert!(recommendations.len() <= 5);
    assert_eq!(recommendations[0]["crop"], "Wheat");
    assert_eq!(recommendations[0]["score"], 100);
    assert_eq!(recommendations[0]["suitability"], "Excellent");
}

#[tokio::test]
async fn test_recommend_rejects_out_of_range_ph() {
    let (status, body) = post(
        "/api/v1/recommendations",
        json!({
            "state": "Punjab",
            "season": "Rabi",
            "ph": 15.0,
            "use_live_weather": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "ph");
}

#[tokio::test]
async fn test_recommend_rejects_zero_farm_size() {
    let (status, body) = post(
        "/api/v1/recommendations",
        json!({
            "state": "Punjab",
            "season": "Rabi",
            "farm_size": "0",
            "use_live_weather": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recommend_rejects_oversized_farm_and_budget() {
    for (field, value) in [
        ("farm_size", "10000000000000000000000000"),
        ("budget", "79228162514264337593543950335"),
    ] {
        let mut payload = json!({
            "state": "Punjab",
            "season": "Rabi",
            "use_live_weather": false
        });
        payload[field] = json!(value);

        let (status, body) = post("/api/v1/recommendations", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(body["error"]["field"], field);
    }
}

#[tokio::test]
async fn test_recommendation_weather_unavailable_offline() {
    let (status, body) = get("/api/v1/recommendations/weather/Punjab").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "WEATHER_SERVICE_UNAVAILABLE");
}

// ============================================================================
// Yield prediction
// ============================================================================

#[tokio::test]
async fn test_predict_rice_yield_over_two_hectares() {
    let (status, body) = post(
        "/api/v1/yield/predict",
        json!({
            "crop": "rice",
            "state": "Punjab",
            "nitrogen": 120,
            "phosphorus": 60,
            "potassium": 40,
            "ph": 6.2,
            "rainfall": 1200,
            "temperature": 25,
            "humidity": 70,
            "area": 2,
            "use_live_weather": false,
            "use_satellite_data": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["crop"], "Rice");
    assert!((body["predicted_yield"].as_f64().unwrap() - 3125.0).abs() < 0.01);
    assert!((body["total_yield"].as_f64().unwrap() - 6250.0).abs() < 0.01);
    assert_eq!(body["category"], "High");
    assert_eq!(body["weather_source"], "input");
    assert_eq!(body["model"], "rule-based");
}

#[tokio::test]
async fn test_predict_unknown_crop() {
    let (status, body) = post(
        "/api/v1/yield/predict",
        json!({
            "crop": "durian",
            "state": "Punjab",
            "use_live_weather": false,
            "use_satellite_data": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "CROP_NOT_FOUND");
    assert_eq!(body["error"]["field"], "crop");
}

#[tokio::test]
async fn test_predict_rejects_zero_area() {
    let (status, body) = post(
        "/api/v1/yield/predict",
        json!({ "crop": "wheat", "state": "Punjab", "area": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_satellite_unavailable_when_disabled() {
    let (status, body) = get("/api/v1/yield/satellite/Punjab").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "SATELLITE_SERVICE_UNAVAILABLE");
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn test_state_weather_unavailable_offline() {
    let (status, body) = get("/api/v1/weather/Punjab").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_state_weather_unknown_state() {
    let (status, body) = get("/api/v1/weather/Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_weather_alerts_unavailable_offline() {
    let (status, body) = get("/api/v1/weather/Punjab/alerts").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "WEATHER_SERVICE_UNAVAILABLE");

    let (status, body) = get("/api/v1/weather/Atlantis/alerts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
