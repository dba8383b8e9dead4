use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    repositories::users::UserRepository,
    value_objects::{
        enums::user_plans::UserPlan,
        users::{CreateUserModel, UpgradePlanModel, UserDto},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::plans::plan_transition;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("email is required")]
    InvalidEmail,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            UserError::InvalidEmail => StatusCode::BAD_REQUEST,
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UserError>;

pub struct UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
}

impl<U> UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Get-or-create by email. Repeat calls return the stored user with
    /// `last_active` refreshed.
    pub async fn create_user(&self, model: CreateUserModel) -> UseCaseResult<UserDto> {
        let email = model.email.trim().to_string();
        if email.is_empty() {
            warn!("users: create rejected, blank email");
            return Err(UserError::InvalidEmail);
        }

        let existing = self
            .user_repo
            .find_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "users: failed to look up user by email");
                UserError::Internal(err)
            })?;

        if let Some(user) = existing {
            info!(user_id = %user.id, "users: existing user signed in");
            return self.refresh_activity(user.id).await.map(|refreshed| {
                UserDto::from(refreshed.unwrap_or(user))
            });
        }

        let now = Utc::now();
        let new_id = Uuid::new_v4();
        let name = match model.name.trim() {
            "" => email.split('@').next().unwrap_or_default().to_string(),
            name => name.to_string(),
        };
        let insert = InsertUserEntity {
            id: new_id,
            email,
            name,
            profile_pic: model.profile_pic,
            plan: UserPlan::Free.to_string(),
            instagram_handle: model.instagram_handle,
            tiktok_handle: model.tiktok_handle,
            kwai_handle: model.kwai_handle,
            ideas_generated: 0,
            total_paid_minor: 0,
            created_at: now,
            last_active: now,
            is_active: true,
        };

        let stored = self.user_repo.insert_if_absent(insert).await.map_err(|err| {
            error!(db_error = ?err, "users: failed to insert user");
            UserError::Internal(err)
        })?;

        if stored.id != new_id {
            // Lost a race with a concurrent create for the same email.
            info!(user_id = %stored.id, "users: user created concurrently, reusing row");
            let refreshed = self.refresh_activity(stored.id).await?;
            return Ok(UserDto::from(refreshed.unwrap_or(stored)));
        }

        info!(user_id = %stored.id, "users: user created");
        Ok(UserDto::from(stored))
    }

    pub async fn get_user(&self, email: String) -> UseCaseResult<UserDto> {
        let user = self
            .user_repo
            .find_by_email(email.trim().to_string())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "users: failed to look up user by email");
                UserError::Internal(err)
            })?
            .ok_or(UserError::UserNotFound)?;

        Ok(UserDto::from(user))
    }

    pub async fn upgrade_plan(&self, model: UpgradePlanModel) -> UseCaseResult<String> {
        let user_id = model.user_id;
        let changes = plan_transition(model.plan, Utc::now());

        let updated = self
            .user_repo
            .update_plan(user_id, changes)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to update plan");
                UserError::Internal(err)
            })?;

        if !updated {
            warn!(%user_id, "users: plan change for unknown user");
            return Err(UserError::UserNotFound);
        }

        info!(%user_id, plan = %model.plan, "users: plan changed");
        Ok(format!("Plano atualizado para {}", model.plan))
    }

    async fn refresh_activity(&self, user_id: Uuid) -> UseCaseResult<Option<UserEntity>> {
        self.user_repo
            .touch_last_active(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to refresh last_active");
                UserError::Internal(err)
            })
    }
}
