//! Error handling for the rain forecast server
//!
//! Provides consistent error responses in Thai and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FieldViolation, Language};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    #[error("Invalid form submission: {0}")]
    InvalidSubmission(String),

    // Session errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Startup errors
    #[error("Forecasting unavailable: {0}")]
    ArtifactsUnavailable(String),

    // Prediction errors
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn message(&self, language: Language) -> &str {
        match language {
            Language::Thai => &self.message_th,
            Language::English => &self.message_en,
        }
    }
}

impl AppError {
    /// HTTP status and user-facing detail for this error
    pub fn detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation {
                field,
                message,
                message_th,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_th: message_th.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidSubmission(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_SUBMISSION".to_string(),
                    message_en: format!("Invalid form submission: {}", msg),
                    message_th: format!("ข้อมูลที่ส่งมาไม่ถูกต้อง: {}", msg),
                    field: None,
                },
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_STATE_TRANSITION".to_string(),
                    message_en: msg.clone(),
                    message_th: format!("ไม่สามารถเปลี่ยนสถานะได้: {}", msg),
                    field: None,
                },
            ),
            AppError::ArtifactsUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "ARTIFACTS_UNAVAILABLE".to_string(),
                    message_en: msg.clone(),
                    message_th: format!("ไม่สามารถโหลดโมเดลได้: {}", msg),
                    field: None,
                },
            ),
            AppError::Prediction(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "PREDICTION_ERROR".to_string(),
                    message_en: format!("Prediction failed: {}", msg),
                    message_th: format!("เกิดข้อผิดพลาดในการทำนาย: {}", msg),
                    field: None,
                },
            ),
        }
    }
}

impl From<FieldViolation> for AppError {
    fn from(violation: FieldViolation) -> Self {
        let field = violation.field.column();
        AppError::Validation {
            field: field.to_string(),
            message: violation.to_string(),
            message_th: format!("ข้อมูลไม่ถูกต้อง: {} {}", field, violation.message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NumericField;

    #[test]
    fn test_field_violation_maps_to_validation() {
        let err: AppError = FieldViolation {
            field: NumericField::Humidity9am,
            message: "value must be between 0.0 and 100.0".to_string(),
        }
        .into();
        let (status, detail) = err.detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("Humidity9am"));
        assert!(detail.message_th.contains("Humidity9am"));
    }

    #[test]
    fn test_invalid_submission_is_unprocessable() {
        let (status, detail) =
            AppError::InvalidSubmission("missing field `MaxTemp`".to_string()).detail();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail.code, "INVALID_SUBMISSION");
        assert!(detail.message(Language::English).contains("MaxTemp"));
        assert!(detail.message(Language::Thai).contains("MaxTemp"));
    }

    #[test]
    fn test_prediction_error_localized() {
        let (status, detail) = AppError::Prediction("boom".to_string()).detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail.message(Language::Thai), "เกิดข้อผิดพลาดในการทำนาย: boom");
        assert_eq!(detail.message(Language::English), "Prediction failed: boom");
    }
}
