use anyhow::Result;
use crates::domain::{
    entities::users::UserEntity, repositories::users::UserRepository,
    value_objects::plans::FREE_IDEA_LIMIT,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allow,
    Deny { used: i32, limit: i32 },
}

/// Free-tier idea ceiling. The check and the increment are separate statements,
/// so concurrent requests from one free user can overshoot the limit by a batch.
pub struct QuotaPolicy<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    free_limit: i32,
}

impl<U> QuotaPolicy<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self {
            user_repo,
            free_limit: FREE_IDEA_LIMIT,
        }
    }

    pub fn authorize(&self, user: &UserEntity) -> QuotaDecision {
        if user.plan().is_premium() {
            return QuotaDecision::Allow;
        }

        if user.ideas_generated >= self.free_limit {
            debug!(
                user_id = %user.id,
                used = user.ideas_generated,
                limit = self.free_limit,
                "quota_policy: free limit reached"
            );
            return QuotaDecision::Deny {
                used: user.ideas_generated,
                limit: self.free_limit,
            };
        }

        QuotaDecision::Allow
    }

    /// Adds `count` to the user's counter and returns the new total.
    pub async fn record(&self, user_id: Uuid, count: i32) -> Result<i32> {
        let total = self
            .user_repo
            .increment_ideas_generated(user_id, count)
            .await?;
        debug!(%user_id, count, total, "quota_policy: usage recorded");
        Ok(total)
    }
}
