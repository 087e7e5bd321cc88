use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no route for GET /{path} with query parameters {params:?}")]
    NoMatchingRoute { path: String, params: Vec<String> },
    #[error("query parameter '{param}' must be an integer, got '{value}'")]
    ParameterCoercion { param: String, value: String },
    #[error("more than one route for GET /{path} with query parameters {params:?}")]
    AmbiguousRoute { path: String, params: Vec<String> },
    #[error("route GET /{path} declares query parameter '{param}' twice")]
    DuplicateParameter { path: String, param: String },
    #[error("handler argument '{param}' is missing or has the wrong type")]
    ArgumentMismatch { param: String },
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NoMatchingRoute { .. } => StatusCode::NOT_FOUND,
            DispatchError::ParameterCoercion { .. } => StatusCode::BAD_REQUEST,
            DispatchError::AmbiguousRoute { .. }
            | DispatchError::DuplicateParameter { .. }
            | DispatchError::ArgumentMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("environment error: {0}")]
    EnvError(#[from] std::env::VarError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            AppError::Dispatch(e) => (e.status(), e.to_string()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
