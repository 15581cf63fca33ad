//! Error handling for the Agri Advisor backend
//!
//! Provides consistent error responses in English and Hindi

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{AdvisoryError, ReferenceDataError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_hi: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Advisory errors
    #[error("Crop not found: {0}")]
    CropNotFound(String),

    #[error("No suitable crops found")]
    NoSuitableCrops,

    // External service errors
    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("Satellite data service unavailable")]
    SatelliteServiceUnavailable,

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Validation failure on a single request field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_hi: format!("अमान्य मान: {}", field),
        }
    }
}

impl From<AdvisoryError> for AppError {
    fn from(err: AdvisoryError) -> Self {
        match err {
            AdvisoryError::CropNotFound(crop) => AppError::CropNotFound(crop),
        }
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(err: ReferenceDataError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        match fields.first() {
            Some(field) => {
                let message = field_errors
                    .get(field)
                    .and_then(|errs| errs.first())
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field));
                AppError::invalid_field(field, &message)
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_hi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_hi,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_hi: message_hi.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_hi: format!("अमान्य अनुरोध: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_hi: format!("{} नहीं मिला", resource),
                    field: None,
                },
            ),
            AppError::CropNotFound(crop) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "CROP_NOT_FOUND".to_string(),
                    message_en: format!("Crop '{}' not found", crop),
                    message_hi: format!("फसल '{}' नहीं मिली", crop),
                    field: Some("crop".to_string()),
                },
            ),
            AppError::NoSuitableCrops => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NO_SUITABLE_CROPS".to_string(),
                    message_en: "No suitable crops found for these conditions".to_string(),
                    message_hi: "इन परिस्थितियों के लिए कोई उपयुक्त फसल नहीं मिली".to_string(),
                    field: None,
                },
            ),
            AppError::WeatherServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "WEATHER_SERVICE_UNAVAILABLE".to_string(),
                    message_en: "Weather service is temporarily unavailable".to_string(),
                    message_hi: "मौसम सेवा अस्थायी रूप से उपलब्ध नहीं है".to_string(),
                    field: None,
                },
            ),
            AppError::SatelliteServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SATELLITE_SERVICE_UNAVAILABLE".to_string(),
                    message_en: "Satellite data service is temporarily unavailable".to_string(),
                    message_hi: "उपग्रह डेटा सेवा अस्थायी रूप से उपलब्ध नहीं है".to_string(),
                    field: None,
                },
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "EXTERNAL_SERVICE_ERROR".to_string(),
                    message_en: format!("External service error: {}", msg),
                    message_hi: format!("बाहरी सेवा त्रुटि: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_hi: format!("कॉन्फ़िगरेशन त्रुटि: {}", msg),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
