//! API Request/Response Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::CommandOutcome;
use crate::models::{ControlError, ParseCommandError};

// ============================================
// Command responses
// ============================================

/// Light command result
#[derive(Debug, Serialize)]
pub struct LightResponse {
    pub mode: String,
    pub success: bool,
    pub message: String,
}

impl From<CommandOutcome> for LightResponse {
    fn from(outcome: CommandOutcome) -> Self {
        Self {
            mode: outcome.command.to_string(),
            success: true,
            message: outcome.message,
        }
    }
}

/// AC command result
#[derive(Debug, Serialize)]
pub struct AcResponse {
    pub action: String,
    pub success: bool,
    pub message: String,
}

impl From<CommandOutcome> for AcResponse {
    fn from(outcome: CommandOutcome) -> Self {
        Self {
            action: outcome.command.to_string(),
            success: true,
            message: outcome.message,
        }
    }
}

// ============================================
// Errors
// ============================================

/// Error body: `{ "detail": ..., "error_type": ... }`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub detail: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Vec<&'static str>>,
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
            error_type: "NotFound".to_string(),
            expected: None,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
            error_type: "InternalError".to_string(),
            expected: None,
        }
    }
}

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        Self {
            status: StatusCode::from_u16(err.code().http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            detail: err.to_string(),
            error_type: err.error_type().to_string(),
            expected: None,
        }
    }
}

impl From<ParseCommandError> for ApiError {
    fn from(err: ParseCommandError) -> Self {
        Self {
            status: StatusCode::from_u16(err.code().http_status())
                .unwrap_or(StatusCode::BAD_REQUEST),
            detail: err.to_string(),
            error_type: "ValueError".to_string(),
            expected: Some(err.expected()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

// ============================================
// Service info / Health
// ============================================

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub transmitter_device: String,
}
