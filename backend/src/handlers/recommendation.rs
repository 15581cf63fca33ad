//! HTTP handlers for crop recommendation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::external::weather::CurrentWeather;
use crate::services::recommendation::{
    RecommendationInput, RecommendationResponse, RecommendationService,
};
use crate::AppState;

/// Recommend crops for a farmer's conditions
pub async fn recommend_crops(
    State(state): State<AppState>,
    Json(input): Json<RecommendationInput>,
) -> AppResult<Json<RecommendationResponse>> {
    let service = RecommendationService::new(state.reference.clone(), state.weather_service());
    let response = service.recommend(input).await?;
    Ok(Json(response))
}

#[derive(Serialize)]
pub struct RecommendationWeatherResponse {
    pub success: bool,
    pub state: String,
    pub weather: CurrentWeather,
}

/// Live weather snapshot used by the recommendation scorer
pub async fn get_recommendation_weather(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> AppResult<Json<RecommendationWeatherResponse>> {
    let weather = state
        .weather_service()
        .current_for_state(&state_name)
        .await?;
    Ok(Json(RecommendationWeatherResponse {
        success: true,
        state: state_name.trim().to_string(),
        weather,
    }))
}
