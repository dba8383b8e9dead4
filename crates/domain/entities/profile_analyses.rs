use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::profile_analyses;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = profile_analyses)]
pub struct ProfileAnalysisEntity {
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

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = profile_analyses)]
pub struct InsertProfileAnalysisEntity {
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

impl From<InsertProfileAnalysisEntity> for ProfileAnalysisEntity {
    fn from(value: InsertProfileAnalysisEntity) -> Self {
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
