use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{content_ideas::ContentIdeaRepository, users::UserRepository},
        value_objects::content_ideas::GenerateIdeasModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{content_ideas::ContentIdeaPostgres, users::UserPostgres},
    },
    llm::gemini_client::GeminiClient,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    axum_http::error_responses::AppError,
    usecases::{content_ideas::ContentIdeaUseCase, llm_gateway::LlmGateway},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, llm: Arc<GeminiClient>, max_output_tokens: u32) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let content_idea_repository = ContentIdeaPostgres::new(Arc::clone(&db_pool));
    let content_idea_usecase = ContentIdeaUseCase::new(
        Arc::new(user_repository),
        Arc::new(content_idea_repository),
        llm,
        max_output_tokens,
    );

    Router::new()
        .route("/generate-ideas", post(generate_ideas))
        // One path for both verbs: GET reads it as a user id, DELETE as an idea id.
        .route("/ideas/:id", get(list_ideas).delete(delete_idea))
        .with_state(Arc::new(content_idea_usecase))
}

pub async fn generate_ideas<U, I, L>(
    State(content_idea_usecase): State<Arc<ContentIdeaUseCase<U, I, L>>>,
    Json(generate_ideas_model): Json<GenerateIdeasModel>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    let ideas = content_idea_usecase
        .generate_ideas(generate_ideas_model)
        .await?;
    Ok(Json(ideas))
}

pub async fn list_ideas<U, I, L>(
    State(content_idea_usecase): State<Arc<ContentIdeaUseCase<U, I, L>>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    let ideas = content_idea_usecase.list_ideas(user_id).await?;
    Ok(Json(ideas))
}

pub async fn delete_idea<U, I, L>(
    State(content_idea_usecase): State<Arc<ContentIdeaUseCase<U, I, L>>>,
    Path(idea_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    content_idea_usecase.delete_idea(idea_id).await?;
    Ok(Json(json!({ "message": "Ideia deletada com sucesso" })))
}
