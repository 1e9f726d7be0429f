use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use blogforge_core::error::{ApiError, ErrorEnvelope};
use blogforge_mailer::MailError;
use blogforge_metadata::MetadataError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<MetadataError> for AppError {
    fn from(e: MetadataError) -> Self {
        let api = match e {
            MetadataError::Configuration(msg) => ApiError::Configuration(msg),
            MetadataError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            MetadataError::NotFound => ApiError::NotFound("no results found for that query".into()),
            MetadataError::Network(msg) | MetadataError::Provider(msg) => ApiError::Upstream(msg),
        };
        Self(api)
    }
}

impl From<MailError> for AppError {
    fn from(e: MailError) -> Self {
        let api = match e {
            MailError::Configuration(msg) => ApiError::Configuration(msg),
            MailError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            MailError::Transport(msg) => ApiError::Transport(msg),
        };
        Self(api)
    }
}
