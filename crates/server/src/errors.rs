use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Wire shape of every JSON error: `{"error": <title>, "detail": <message>}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title.to_string(), detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}

/// Status for each service outcome; shared by the JSON and HTML handlers.
pub fn status_for(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = status_for(&e);
        let (title, detail) = match &e {
            ServiceError::Validation(msg) => ("Validation Error", Some(msg.clone())),
            ServiceError::Conflict(msg) => ("Conflict", Some(msg.clone())),
            ServiceError::NotFound(msg) => ("Not Found", Some(msg.clone())),
            ServiceError::Unauthorized => ("Unauthorized", None),
            // internals stay in the log
            ServiceError::Unavailable(_) => ("Store Unavailable", None),
            ServiceError::Hash(_) => ("Internal Error", None),
        };
        if status.is_server_error() {
            error!(code = e.code(), err = %e, "request failed");
        } else {
            warn!(code = e.code(), err = %e, "request rejected");
        }
        JsonApiError::new(status, title, detail)
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Request Body", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("service initialization failed: {0}")]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
