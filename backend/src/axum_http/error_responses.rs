use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::{
    admin::AdminError, content_ideas::ContentIdeaError, payments::PaymentError,
    profile_analyses::ProfileAnalysisError, users::UserError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a use-case failure onto the response variant matching its status code.
    fn from_status(status: StatusCode, message: String, internal: Option<anyhow::Error>) -> Self {
        match (status, internal) {
            (_, Some(err)) => AppError::Internal(err),
            (StatusCode::UNAUTHORIZED, None) => AppError::Unauthorized(message),
            (StatusCode::FORBIDDEN, None) => AppError::Forbidden(message),
            (StatusCode::NOT_FOUND, None) => AppError::NotFound(message),
            (StatusCode::BAD_REQUEST, None) => AppError::BadRequest(message),
            (_, None) => AppError::Internal(anyhow::anyhow!(message)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                error!(error = ?err, "request failed with internal error");
                // Don't leak internal error detail to client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

macro_rules! impl_from_usecase_error {
    ($($error:ident),+ $(,)?) => {
        $(
            impl From<$error> for AppError {
                fn from(err: $error) -> Self {
                    let status = err.status_code();
                    let message = err.to_string();
                    match err {
                        $error::Internal(inner) => AppError::from_status(status, message, Some(inner)),
                        _ => AppError::from_status(status, message, None),
                    }
                }
            }
        )+
    };
}

impl_from_usecase_error!(
    UserError,
    ContentIdeaError,
    ProfileAnalysisError,
    PaymentError,
    AdminError,
);
