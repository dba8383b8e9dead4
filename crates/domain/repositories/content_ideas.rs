use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::content_ideas::{ContentIdeaEntity, InsertContentIdeaEntity};

#[automock]
#[async_trait]
pub trait ContentIdeaRepository {
    async fn save_all(&self, ideas: Vec<InsertContentIdeaEntity>) -> Result<Vec<ContentIdeaEntity>>;

    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ContentIdeaEntity>>;

    /// Returns `false` when nothing matched `idea_id`.
    async fn delete_by_id(&self, idea_id: Uuid) -> Result<bool>;

    async fn count_all(&self) -> Result<i64>;
}
