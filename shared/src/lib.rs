//! Shared types and calculation core for the Agri Advisor platform
//!
//! This crate contains the reference tables, the crop suitability scorer and
//! the yield predictor. Everything here is pure and synchronous so it can be
//! used by the backend and by the browser (via WASM) alike.

pub mod error;
pub mod models;
pub mod predictor;
pub mod reference;
pub mod scoring;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use predictor::{RuleBasedPredictor, YieldPredictor};
pub use reference::ReferenceData;
pub use scoring::CropScorer;
pub use types::*;
pub use validation::*;
