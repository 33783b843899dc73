/// Error handling for the web server
///
/// Read handlers return `ApiResult<T>`; any storage fault becomes a JSON error
/// response. Write handlers never fail this way: they report storage faults as
/// flash notifications and always redirect (see `routes::pages`).
///
/// # Example
///
/// ```
/// use quillpad_web::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler(found: bool) -> ApiResult<Json<serde_json::Value>> {
///     if !found {
///         return Err(ApiError::NotFound("No such thing".to_string()));
///     }
///     Ok(Json(json!({ "data": [] })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a read handler
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 500; the detail is logged, never sent
    #[error("Internal error: {0}")]
    InternalError(String),

    /// 503, e.g. no pooled connection became available in time
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code: `not_found`, `internal_error`, `service_unavailable`
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::InternalError(_) => "internal_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            ApiError::NotFound(msg) => msg,
            ApiError::InternalError(detail) => {
                tracing::error!(%detail, "Request failed");
                "An internal error occurred".to_string()
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!(%msg, "Request could not be served");
                msg
            }
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::PoolTimedOut => {
                ApiError::ServiceUnavailable("Database is busy, try again".to_string())
            }
            other => ApiError::InternalError(format!("Database error: {}", other)),
        }
    }
}
