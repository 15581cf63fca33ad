//! Business logic services for the Agri Advisor backend

pub mod recommendation;
pub mod weather;
pub mod yield_prediction;

pub use recommendation::RecommendationService;
pub use weather::WeatherService;
pub use yield_prediction::YieldPredictionService;
