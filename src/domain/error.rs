use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("missing or empty required field: {0}")]
    Validation(String),
    #[error("request path id and request body id must match")]
    IdMismatch,
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::IdMismatch => StatusCode::BAD_REQUEST,
            DomainError::PostNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::PostNotFound(id) => Some(json!({ "resource": id })),
            DomainError::Validation(field) => Some(json!({ "field": field })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            DomainError::Validation("title".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DomainError::IdMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            DomainError::PostNotFound(Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::Internal("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
