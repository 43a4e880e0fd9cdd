use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cobalt_dns_domain::DomainError;
use serde_json::json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::ZoneNotFound(_) | DomainError::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }

            DomainError::InvalidRecordData(_)
            | DomainError::InvalidRecordType(_)
            | DomainError::InvalidRecordClass(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),

            DomainError::ZoneAlreadyExists(_) | DomainError::DuplicateRecord => {
                (StatusCode::CONFLICT, self.0.to_string())
            }

            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
