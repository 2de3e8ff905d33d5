use crate::models::db_operations::DbError;
use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use serde_json::json;
use thiserror::Error;

/// Errors a JSON handler can answer with. Every variant maps to one status
/// code and a `{"error": "..."}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::Validation("Missing required fields".to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(_) => ApiError::NotFound,
            DbError::Conflict(what) => ApiError::Conflict(format!("The {} is already in use", what)),
            DbError::MissingReference(what) => ApiError::Validation(format!("Unknown {}", what)),
            DbError::InvalidValue(what) => ApiError::Validation(format!("Invalid value '{}'", what)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(e: r2d2::Error) -> Self {
        ApiError::Internal(format!("R2D2 Pool error: {}", e))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(cause) = self {
            log::error!("Request failed: {}", cause);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Answers malformed JSON bodies with the same error shape as validation failures.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body: {}", err);
    ApiError::Validation("Invalid JSON body".to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_map_onto_http_taxonomy() {
        let cases = [
            (DbError::NotFound("country x".into()), StatusCode::NOT_FOUND),
            (DbError::Conflict("slug 'germany'".into()), StatusCode::CONFLICT),
            (DbError::MissingReference("country y".into()), StatusCode::BAD_REQUEST),
            (DbError::InvalidValue("archived".into()), StatusCode::BAD_REQUEST),
            (
                DbError::Rusqlite(rusqlite::Error::InvalidQuery),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (db_error, status) in cases {
            assert_eq!(ApiError::from(db_error).status_code(), status);
        }
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let err = ApiError::Internal("disk I/O error".into());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
