//! Domain models for the Agri Advisor platform

mod crop;
mod prediction;
mod query;
mod recommendation;
mod satellite;
mod state;

pub use crop::*;
pub use prediction::*;
pub use query::*;
pub use recommendation::*;
pub use satellite::*;
pub use state::*;
