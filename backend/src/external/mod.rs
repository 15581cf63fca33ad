//! External API integrations

pub mod nasa_power;
pub mod weather;

pub use nasa_power::NasaPowerClient;
pub use weather::WeatherClient;
