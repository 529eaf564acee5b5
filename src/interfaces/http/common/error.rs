//! Mapping of domain errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiEnvelope;
use crate::domain::DomainError;

pub type ApiResult<T = Json<ApiEnvelope>> = Result<T, ApiError>;

/// Handler error; wraps a [`DomainError`] and renders it as an envelope.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_body(self) -> (StatusCode, ApiEnvelope) {
        match self.0 {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, ApiEnvelope::error(message)),
            DomainError::InvalidFields(messages) => {
                (StatusCode::BAD_REQUEST, ApiEnvelope::errors(messages))
            }
            DomainError::Conflict(message) => {
                (StatusCode::BAD_REQUEST, ApiEnvelope::message(message))
            }
            DomainError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                ApiEnvelope::message(format!("{} not found", entity)),
            ),
            DomainError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ApiEnvelope::error(message))
            }
            DomainError::Unsupported(message) => {
                (StatusCode::METHOD_NOT_ALLOWED, ApiEnvelope::message(message))
            }
            DomainError::Internal(err) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiEnvelope::message(err.to_string()),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::InfraError;

    fn render(err: DomainError) -> (StatusCode, serde_json::Value) {
        let (status, body) = ApiError(err).status_and_body();
        (status, serde_json::to_value(body).unwrap())
    }

    #[test]
    fn not_found_names_the_entity() {
        let (status, body) = render(DomainError::not_found("Admin", "id", "42"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Admin not found");
    }

    #[test]
    fn client_errors_use_their_own_keys() {
        let (status, body) = render(DomainError::Unauthorized("Incorrect password".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect password");

        let (status, body) = render(DomainError::Conflict("taken".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "taken");

        let (status, body) = render(DomainError::InvalidFields(vec!["Name is required".into()]));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"][0], "Name is required");

        let (status, _) = render(DomainError::Unsupported("no".into()));
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn internal_errors_carry_the_cause() {
        let err = DomainError::Internal(InfraError::Database(sea_orm::DbErr::Custom(
            "disk full".into(),
        )));
        let (status, body) = render(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("disk full"));
    }
}
