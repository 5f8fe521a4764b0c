//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use devices_domain::error::{DeviceHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable rule code, present on lifecycle refusals.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub code: Option<&'static str>,
}

/// Maps [`DeviceHubError`] and body extraction failures to an HTTP response
/// with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by the device service.
    Domain(DeviceHubError),
    /// The request body could not be read as the expected JSON document.
    MalformedBody(JsonRejection),
}

impl From<DeviceHubError> for ApiError {
    fn from(err: DeviceHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            Self::MalformedBody(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
                None,
            ),
            Self::Domain(DeviceHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string(), None)
            }
            Self::Domain(DeviceHubError::RuleViolation(violation)) => (
                StatusCode::BAD_REQUEST,
                violation.to_string(),
                Some(violation.code()),
            ),
            Self::Domain(DeviceHubError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, err.to_string(), None)
            }
            Self::Domain(DeviceHubError::Storage(err)) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}
