//! HTTP handlers for reference data listings

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{PhRange, RiskLevel, Season, SoilCompatibility, WaterLevel};

use crate::AppState;

#[derive(Serialize)]
pub struct StateSummary {
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub yield_multiplier: f64,
}

#[derive(Serialize)]
pub struct StatesResponse {
    pub success: bool,
    pub states: Vec<StateSummary>,
}

/// List supported states
pub async fn list_states(State(state): State<AppState>) -> Json<StatesResponse> {
    let states = state
        .reference
        .states
        .iter()
        .map(|s| StateSummary {
            name: s.name.clone(),
            city: s.city.clone(),
            latitude: s.location.latitude,
            longitude: s.location.longitude,
            yield_multiplier: s.yield_multiplier,
        })
        .collect();

    Json(StatesResponse {
        success: true,
        states,
    })
}

#[derive(Serialize)]
pub struct SeasonSummary {
    pub name: Season,
    pub months: &'static str,
}

#[derive(Serialize)]
pub struct SeasonsResponse {
    pub success: bool,
    pub seasons: Vec<SeasonSummary>,
}

/// List cropping seasons
pub async fn list_seasons() -> Json<SeasonsResponse> {
    let seasons = Season::ALL
        .iter()
        .map(|&season| SeasonSummary {
            name: season,
            months: match season {
                Season::Kharif => "June - October",
                Season::Rabi => "October - March",
                Season::Zaid => "March - June",
            },
        })
        .collect();

    Json(SeasonsResponse {
        success: true,
        seasons,
    })
}

#[derive(Serialize)]
pub struct SoilTypesResponse {
    pub success: bool,
    pub soil_types: Vec<SoilCompatibility>,
}

/// List soil types with their compatible labels
pub async fn list_soil_types(State(state): State<AppState>) -> Json<SoilTypesResponse> {
    Json(SoilTypesResponse {
        success: true,
        soil_types: state.reference.soil_compatibility.clone(),
    })
}

#[derive(Serialize)]
pub struct WaterLevelsResponse {
    pub success: bool,
    pub water_levels: Vec<WaterLevel>,
}

pub async fn list_water_levels() -> Json<WaterLevelsResponse> {
    Json(WaterLevelsResponse {
        success: true,
        water_levels: WaterLevel::ALL.to_vec(),
    })
}

#[derive(Serialize)]
pub struct CropSummary {
    pub id: String,
    pub name: String,
    pub seasons: Vec<Season>,
    pub water_need: WaterLevel,
    pub soil_types: Vec<String>,
    pub ph_range: PhRange,
    pub duration_days: u32,
    pub risk_level: RiskLevel,
    pub investment_per_hectare: Decimal,
    pub avg_yield_per_hectare: f64,
}

#[derive(Serialize)]
pub struct CropsResponse {
    pub success: bool,
    pub crops: Vec<CropSummary>,
}

/// List crops in the reference tables
pub async fn list_crops(State(state): State<AppState>) -> Json<CropsResponse> {
    let crops = state
        .reference
        .crops
        .iter()
        .map(|c| CropSummary {
            id: c.id.clone(),
            name: c.display_name(),
            seasons: c.seasons.clone(),
            water_need: c.water_need,
            soil_types: c.soil_types.clone(),
            ph_range: c.ph_range,
            duration_days: c.duration_days,
            risk_level: c.risk_level,
            investment_per_hectare: c.investment_per_hectare,
            avg_yield_per_hectare: c.avg_yield_per_hectare,
        })
        .collect();

    Json(CropsResponse {
        success: true,
        crops,
    })
}
