//! Agri Advisor backend
//!
//! REST API for crop recommendations and yield predictions for Indian
//! farmers, backed by static reference tables and optional live weather and
//! NASA POWER satellite data.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::{ReferenceData, RuleBasedPredictor, YieldPredictor};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::{NasaPowerClient, WeatherClient};
use services::{WeatherService, YieldPredictionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reference: Arc<ReferenceData>,
    pub predictor: Arc<dyn YieldPredictor>,
    pub weather_client: Option<WeatherClient>,
    pub satellite_client: Option<NasaPowerClient>,
}

impl AppState {
    /// Load reference tables and build external clients from configuration
    pub fn new(config: Config) -> AppResult<Self> {
        let reference = match &config.reference.data_path {
            Some(path) => {
                tracing::info!("Loading reference data from {}", path);
                ReferenceData::from_json_file(path)?
            }
            None => {
                let data = ReferenceData::builtin();
                data.validate()?;
                data
            }
        };
        let reference = Arc::new(reference);

        let weather_client = if config.weather_enabled() {
            Some(WeatherClient::new(&config.weather)?)
        } else {
            tracing::warn!("Weather API key not set, live weather disabled");
            None
        };

        let satellite_client = if config.satellite.enabled {
            Some(NasaPowerClient::new(&config.satellite)?)
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            predictor: Arc::new(RuleBasedPredictor::new(reference.clone())),
            reference,
            weather_client,
            satellite_client,
        })
    }

    pub fn weather_service(&self) -> WeatherService {
        WeatherService::new(self.reference.clone(), self.weather_client.clone())
    }

    pub fn yield_service(&self) -> YieldPredictionService {
        YieldPredictionService::new(
            self.reference.clone(),
            self.predictor.clone(),
            self.weather_service(),
            self.satellite_client.clone(),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agri Advisor API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
