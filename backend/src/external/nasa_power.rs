//! NASA POWER client for satellite-derived agro-climate data
//!
//! The daily point API is free and needs no key. Responses carry one
//! `date -> value` series per requested parameter.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use shared::models::{power_date_window, SatelliteSummary, POWER_PARAMETERS};
use shared::GpsCoordinates;

use crate::config::SatelliteConfig;
use crate::error::{AppError, AppResult};

/// NASA POWER API client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: Client,
    base_url: String,
    lookback_days: i64,
}

/// NASA POWER API response
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: BTreeMap<String, BTreeMap<String, f64>>,
}

impl NasaPowerClient {
    /// Create a new NasaPowerClient from configuration
    pub fn new(config: &SatelliteConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("NASA POWER client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.clone(),
            lookback_days: config.lookback_days.max(1),
        })
    }

    /// Fetch and summarize the lookback window for a location
    pub async fn get_summary(&self, location: &GpsCoordinates) -> AppResult<SatelliteSummary> {
        let (start, end) = power_date_window(Utc::now().date_naive(), self.lookback_days);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("parameters", POWER_PARAMETERS.join(",")),
                ("community", "AG".to_string()),
                ("longitude", location.longitude.to_string()),
                ("latitude", location.latitude.to_string()),
                ("start", start.format("%Y%m%d").to_string()),
                ("end", end.format("%Y%m%d").to_string()),
                ("format", "JSON".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("NASA POWER request failed: {}", e);
                AppError::SatelliteServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "NASA POWER error: {} - {}",
                status, body
            )));
        }

        let data: PowerResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse NASA POWER response: {}", e))
        })?;

        Ok(SatelliteSummary::from_parameter_series(&data.properties.parameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power_response() {
        let json = r#"{
            "type": "Feature",
            "properties": {
                "parameter": {
                    "GWETROOT": {"20250301": 0.6, "20250302": 0.6},
                    "GWETPROF": {"20250301": 0.4, "20250302": -999.0},
                    "T2M": {"20250301": 24.0, "20250302": 26.0}
                }
            }
        }"#;
        let data: PowerResponse = serde_json::from_str(json).unwrap();
        let summary = SatelliteSummary::from_parameter_series(&data.properties.parameter);

        assert!((summary.soil_moisture_index - 0.52).abs() < 1e-9);
        assert_eq!(summary.temperature_avg(), Some(25.0));
    }
}
