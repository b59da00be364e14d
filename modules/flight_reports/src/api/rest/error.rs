use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::error::DomainError;

/// REST-facing wrapper around domain errors: validation failures answer
/// 400 with their message, missed lookups answer a bare 404.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::TitleRequired => {
                (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
            }
            DomainError::ReportNotFound { .. } | DomainError::FlightNotFound { .. } => {
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}
