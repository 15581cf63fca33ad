//! HTTP handlers for the Agri Advisor API

pub mod health;
pub mod recommendation;
pub mod reference;
pub mod weather;
pub mod yield_prediction;

pub use health::*;
pub use recommendation::*;
pub use reference::*;
pub use weather::*;
pub use yield_prediction::*;
