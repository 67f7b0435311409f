use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::db::StoreError;
use crate::validation::{FieldErrors, ValidationError};

pub const COURSE_NOT_FOUND: &str = "Course not found";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Course not found")]
    NotFound,

    #[error("Malformed JSON payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Tag a store failure with the operation it interrupted.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { context, source }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldErrorResponse {
    pub success: bool,
    pub errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::Validation(ValidationError::Fields(errors)) => {
                warn!(fields = ?errors.fields(), "course payload failed validation");
                let body = Json(FieldErrorResponse {
                    success: false,
                    errors,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Validation(ValidationError::ArrayPayload { message, error }) => {
                warn!("rejected array payload");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message.to_string(),
                    Some(error.to_string()),
                )
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, COURSE_NOT_FOUND.to_string(), None),
            AppError::MalformedJson(e) => {
                warn!("malformed json payload: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Malformed JSON payload".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Store { context, source } => {
                error!("{}: {}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    context.to_string(),
                    Some(source.to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: detail,
        });

        (status, body).into_response()
    }
}
