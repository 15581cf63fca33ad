//! HTTP handlers for yield prediction endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{satellite_yield_factor, SatelliteFactor, SatelliteSummary};

use crate::error::AppResult;
use crate::services::yield_prediction::{YieldPredictionInput, YieldPredictionResponse};
use crate::AppState;

/// Predict yield for a crop
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(input): Json<YieldPredictionInput>,
) -> AppResult<Json<YieldPredictionResponse>> {
    let response = state.yield_service().predict(input).await?;
    Ok(Json(response))
}

#[derive(Serialize)]
pub struct SatelliteResponse {
    pub success: bool,
    pub state: String,
    pub summary: SatelliteSummary,
    pub yield_factor: SatelliteFactor,
    pub source: String,
}

/// NASA POWER summary for a state
pub async fn get_satellite_data(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> AppResult<Json<SatelliteResponse>> {
    let summary = state
        .yield_service()
        .satellite_for_state(&state_name)
        .await?;

    Ok(Json(SatelliteResponse {
        success: true,
        state: state_name.trim().to_string(),
        yield_factor: satellite_yield_factor(&summary),
        summary,
        source: "NASA POWER".to_string(),
    }))
}
