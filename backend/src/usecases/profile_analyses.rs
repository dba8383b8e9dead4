use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::profile_analyses::InsertProfileAnalysisEntity,
    repositories::{profile_analyses::ProfileAnalysisRepository, users::UserRepository},
    value_objects::{
        enums::platforms::Platform,
        profile_analyses::{AnalyzeProfileModel, ProfileAnalysisDto},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    analysis_normalizer::{NormalizedAnalysis, fallback_analysis, normalize_analysis},
    llm_gateway::LlmGateway,
    niche::detect_niche,
    prompts::{PROFILE_ANALYSIS_SYSTEM_INSTRUCTION, build_analysis_user_message},
};

pub const ANALYSIS_LIST_LIMIT: i64 = 10;

#[derive(Debug, Error)]
pub enum ProfileAnalysisError {
    #[error("user not found")]
    UserNotFound,
    #[error("profile analysis is available on the premium plan only")]
    PremiumRequired,
    #[error("{0}")]
    InvalidPlatform(String),
    #[error("handle is required")]
    InvalidHandle,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ProfileAnalysisError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ProfileAnalysisError::UserNotFound => StatusCode::NOT_FOUND,
            ProfileAnalysisError::PremiumRequired => StatusCode::FORBIDDEN,
            ProfileAnalysisError::InvalidPlatform(_) | ProfileAnalysisError::InvalidHandle => {
                StatusCode::BAD_REQUEST
            }
            ProfileAnalysisError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ProfileAnalysisError>;

pub struct ProfileAnalysisUseCase<U, P, L>
where
    U: UserRepository + Send + Sync + 'static,
    P: ProfileAnalysisRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    analysis_repo: Arc<P>,
    llm: Arc<L>,
    max_output_tokens: u32,
}

impl<U, P, L> ProfileAnalysisUseCase<U, P, L>
where
    U: UserRepository + Send + Sync + 'static,
    P: ProfileAnalysisRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, analysis_repo: Arc<P>, llm: Arc<L>, max_output_tokens: u32) -> Self {
        Self {
            user_repo,
            analysis_repo,
            llm,
            max_output_tokens,
        }
    }

    /// Premium gating runs before the platform and handle are validated.
    pub async fn analyze_profile(&self, model: AnalyzeProfileModel) -> UseCaseResult<ProfileAnalysisDto> {
        let user_id = model.user_id;
        info!(%user_id, "profile_analyses: analysis requested");

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "profile_analyses: failed to load user");
                ProfileAnalysisError::Internal(err)
            })?
            .ok_or(ProfileAnalysisError::UserNotFound)?;

        if !user.plan().is_premium() {
            warn!(%user_id, "profile_analyses: denied for free plan");
            return Err(ProfileAnalysisError::PremiumRequired);
        }

        let platform: Platform = model
            .platform
            .parse()
            .map_err(ProfileAnalysisError::InvalidPlatform)?;

        let handle = model.handle.trim().trim_start_matches('@').trim().to_string();
        if handle.is_empty() {
            return Err(ProfileAnalysisError::InvalidHandle);
        }

        let niche = detect_niche(&handle);
        let normalized = match self
            .llm
            .generate(
                PROFILE_ANALYSIS_SYSTEM_INSTRUCTION.to_string(),
                build_analysis_user_message(platform, &handle, niche),
                self.max_output_tokens,
            )
            .await
        {
            Ok(raw) => normalize_analysis(&raw, platform, &handle),
            Err(err) => {
                warn!(%user_id, llm_error = ?err, "profile_analyses: llm call failed, using fallback");
                NormalizedAnalysis {
                    draft: fallback_analysis(platform, &handle),
                    from_model: false,
                }
            }
        };

        if !normalized.from_model {
            warn!(%user_id, %platform, niche, "profile_analyses: serving fallback analysis");
        }

        let draft = normalized.draft;
        let insert = InsertProfileAnalysisEntity {
            id: Uuid::new_v4(),
            user_id,
            platform: platform.to_string(),
            handle,
            analysis: draft.analysis,
            recommendations: draft.recommendations,
            best_posting_times: draft.best_posting_times,
            audience_insights: draft.audience_insights,
            content_performance: draft.content_performance,
            created_at: Utc::now(),
        };

        let saved = self.analysis_repo.save(insert).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "profile_analyses: failed to persist analysis");
            ProfileAnalysisError::Internal(err)
        })?;

        info!(%user_id, analysis_id = %saved.id, "profile_analyses: analysis stored");
        Ok(ProfileAnalysisDto::from(saved))
    }

    pub async fn list_analyses(&self, user_id: Uuid) -> UseCaseResult<Vec<ProfileAnalysisDto>> {
        let analyses = self
            .analysis_repo
            .list_by_user(user_id, ANALYSIS_LIST_LIMIT)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "profile_analyses: failed to list analyses");
                ProfileAnalysisError::Internal(err)
            })?;

        Ok(analyses.into_iter().map(ProfileAnalysisDto::from).collect())
    }
}
