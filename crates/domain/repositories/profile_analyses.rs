use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::profile_analyses::{
    InsertProfileAnalysisEntity, ProfileAnalysisEntity,
};

#[automock]
#[async_trait]
pub trait ProfileAnalysisRepository {
    async fn save(&self, analysis: InsertProfileAnalysisEntity) -> Result<ProfileAnalysisEntity>;

    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ProfileAnalysisEntity>>;
}
