use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Missing required parameter")]
    MissingParameters { required: Vec<String> },

    #[error("Error contacting identity provider")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response structure. `error` is always present.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingParameters { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let mut response = ErrorResponse {
            error: self.to_string(),
            details: None,
            required: None,
        };

        match self {
            Self::MissingParameters { required } => response.required = Some(required.clone()),
            Self::Upstream(details) | Self::Internal(details) => {
                response.details = Some(details.clone())
            }
            Self::BadRequest(_) => {}
        }

        response
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = self.to_response();

        match error_response.details.as_deref() {
            Some(details) => tracing::error!(
                error = %self,
                details = %details,
                status = %status.as_u16(),
                "Request failed"
            ),
            None => tracing::error!(error = %self, status = %status.as_u16(), "Request failed"),
        }

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
