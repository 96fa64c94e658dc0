use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::progress::ProgressError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Map a storage failure on the access-decision path. Fails closed: the
    /// request is rejected as unavailable, the error is never turned into a
    /// grant or a denial. (Feature-not-provisioned never reaches this point;
    /// the category index already resolved it to "unrestricted".)
    pub fn access_check_failed(err: DatabaseError) -> Self {
        AppError::ServiceUnavailable(format!("access check failed: {err}"))
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            // Dangling course reference: a data-integrity problem, surfaced
            // rather than folded into a zeroed report.
            ProgressError::MissingCourse(_) => AppError::NotFound(err.to_string()),
            ProgressError::Store(e) => AppError::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref err) => match err {
                DatabaseError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
                DatabaseError::Duplicate => (StatusCode::CONFLICT, "Resource already exists"),
                DatabaseError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input data"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                ),
            },
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, "Access denied"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "Resource conflict"),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable")
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        let cases = [
            (
                AppError::Authentication("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Authorization("denied".into()),
                StatusCode::FORBIDDEN,
            ),
            (AppError::NotFound("course".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("enrolled".into()), StatusCode::CONFLICT),
            (
                AppError::Validation("rating".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::access_check_failed(DatabaseError::Unknown("outage".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Database(DatabaseError::Duplicate),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Database(DatabaseError::Unknown("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn dangling_course_maps_to_not_found() {
        let err: AppError = crate::progress::ProgressError::MissingCourse(uuid::Uuid::new_v4()).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
