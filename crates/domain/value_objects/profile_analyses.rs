use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::profile_analyses::ProfileAnalysisEntity;

/// `platform` and `handle` stay untyped here so premium gating runs before they are validated.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeProfileModel {
    pub user_id: Uuid,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisDraft {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub best_posting_times: Vec<String>,
    pub audience_insights: String,
    pub content_performance: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileAnalysisDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub handle: String,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub best_posting_times: Vec<String>,
    pub audience_insights: String,
    pub content_performance: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileAnalysisEntity> for ProfileAnalysisDto {
    fn from(value: ProfileAnalysisEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            platform: value.platform,
            handle: value.handle,
            analysis: value.analysis,
            recommendations: value.recommendations,
            best_posting_times: value.best_posting_times,
            audience_insights: value.audience_insights,
            content_performance: value.content_performance,
            created_at: value.created_at,
        }
    }
}
