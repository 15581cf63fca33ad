//! Route definitions for the Agri Advisor API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(recommendation_routes())
        .nest("/yield", yield_routes())
        .route("/weather/:state", get(handlers::get_state_weather))
        .route("/weather/:state/alerts", get(handlers::get_weather_alerts))
        .nest("/reference", reference_routes())
}

/// Crop recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(handlers::recommend_crops))
        .route(
            "/recommendations/weather/:state",
            get(handlers::get_recommendation_weather),
        )
}

/// Yield prediction routes
fn yield_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::predict_yield))
        .route("/satellite/:state", get(handlers::get_satellite_data))
}

/// Reference data routes
fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/states", get(handlers::list_states))
        .route("/seasons", get(handlers::list_seasons))
        .route("/soil-types", get(handlers::list_soil_types))
        .route("/water-levels", get(handlers::list_water_levels))
        .route("/crops", get(handlers::list_crops))
}
