//! API error handling for the PICCULL Web API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::PiccullError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<PiccullError> for ApiError {
    fn from(err: PiccullError) -> Self {
        match &err {
            PiccullError::Permission(_) => ApiError::forbidden(err.to_string()),
            PiccullError::NotFound(_) => ApiError::not_found(err.to_string()),
            PiccullError::InvalidFolder(_) | PiccullError::Validation(_) => {
                ApiError::bad_request(err.to_string())
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(
            ApiError::bad_request("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::forbidden("no").status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::not_found("missing").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_piccull_error_status_mapping() {
        let err: ApiError = PiccullError::Permission("escape".to_string()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err: ApiError = PiccullError::NotFound("folder".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = PiccullError::InvalidFolder("a.jpg".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = PiccullError::Decode("truncated".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk exploded");
        let err: ApiError = PiccullError::Io(io).into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("disk exploded"));
    }
}
