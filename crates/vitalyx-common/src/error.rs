use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum VitalyxError {
    /// No biomarker or behavioral input could be resolved — nothing to score.
    #[error("Insufficient data: every input field is absent, no domain index can be computed")]
    InsufficientData,

    /// Scenario simulation requested for a session without an established baseline.
    #[error("No baseline panel established for session {0}")]
    MissingBaseline(Uuid),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VitalyxError>;

/// Error wrapper that renders as a JSON HTTP response in the web layer.
#[derive(Debug)]
pub struct ApiError(pub VitalyxError);

impl<E: Into<VitalyxError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VitalyxError::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
            VitalyxError::MissingBaseline(_) => StatusCode::CONFLICT,
            VitalyxError::Extraction(_) => StatusCode::BAD_REQUEST,
            VitalyxError::Serialization(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(status = %status, error = %self.0, "request failed");
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_maps_to_422() {
        let resp = ApiError(VitalyxError::InsufficientData).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_missing_baseline_maps_to_409() {
        let resp = ApiError(VitalyxError::MissingBaseline(Uuid::nil())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
