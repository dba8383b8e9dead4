use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::debug;

use super::error_responses::ErrorResponse;

pub const WELCOME_MESSAGE: &str = "Shadoom API - Seu Gerenciador Fantasma de Engajamento! 👻";

pub async fn not_found() -> impl IntoResponse {
    debug!("backend router: not_found handler invoked");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            code: StatusCode::NOT_FOUND.as_u16(),
            message: "NOT_FOUND".to_string(),
        }),
    )
        .into_response()
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE })).into_response()
}
