use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UpdateUserPlanEntity, UserEntity},
    value_objects::admin::UserStatsModel,
};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;

    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>>;

    /// Inserts unless the email already exists, then returns the stored row for that email.
    async fn insert_if_absent(&self, user: InsertUserEntity) -> Result<UserEntity>;

    async fn touch_last_active(&self, user_id: Uuid) -> Result<Option<UserEntity>>;

    /// Adds `count` to `ideas_generated` in one statement and returns the new total.
    async fn increment_ideas_generated(&self, user_id: Uuid, count: i32) -> Result<i32>;

    /// Returns `false` when no user has the given id.
    async fn update_plan(&self, user_id: Uuid, changes: UpdateUserPlanEntity) -> Result<bool>;

    async fn add_total_paid(&self, user_id: Uuid, amount_minor: i32) -> Result<()>;

    async fn list_users(&self, limit: i64) -> Result<Vec<UserEntity>>;

    async fn user_stats(
        &self,
        active_since: DateTime<Utc>,
        signed_up_since: DateTime<Utc>,
    ) -> Result<UserStatsModel>;
}
