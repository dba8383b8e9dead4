use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{profile_analyses::ProfileAnalysisRepository, users::UserRepository},
        value_objects::profile_analyses::AnalyzeProfileModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{profile_analyses::ProfileAnalysisPostgres, users::UserPostgres},
    },
    llm::gemini_client::GeminiClient,
};
use uuid::Uuid;

use crate::{
    axum_http::error_responses::AppError,
    usecases::{llm_gateway::LlmGateway, profile_analyses::ProfileAnalysisUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, llm: Arc<GeminiClient>, max_output_tokens: u32) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let profile_analysis_repository = ProfileAnalysisPostgres::new(Arc::clone(&db_pool));
    let profile_analysis_usecase = ProfileAnalysisUseCase::new(
        Arc::new(user_repository),
        Arc::new(profile_analysis_repository),
        llm,
        max_output_tokens,
    );

    Router::new()
        .route("/analyze-profile", post(analyze_profile))
        .route("/profile-analysis/:user_id", get(list_analyses))
        .with_state(Arc::new(profile_analysis_usecase))
}

pub async fn analyze_profile<U, P, L>(
    State(profile_analysis_usecase): State<Arc<ProfileAnalysisUseCase<U, P, L>>>,
    Json(analyze_profile_model): Json<AnalyzeProfileModel>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    P: ProfileAnalysisRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    let analysis = profile_analysis_usecase
        .analyze_profile(analyze_profile_model)
        .await?;
    Ok(Json(analysis))
}

pub async fn list_analyses<U, P, L>(
    State(profile_analysis_usecase): State<Arc<ProfileAnalysisUseCase<U, P, L>>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    P: ProfileAnalysisRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    let analyses = profile_analysis_usecase.list_analyses(user_id).await?;
    Ok(Json(analyses))
}
