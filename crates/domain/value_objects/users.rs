use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::users::UserEntity,
    value_objects::{enums::user_plans::UserPlan, payments::minor_to_amount},
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserModel {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub tiktok_handle: Option<String>,
    #[serde(default)]
    pub kwai_handle: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpgradePlanModel {
    pub user_id: Uuid,
    #[serde(default = "default_upgrade_plan")]
    pub plan: UserPlan,
}

fn default_upgrade_plan() -> UserPlan {
    UserPlan::Premium
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub profile_pic: Option<String>,
    pub plan: UserPlan,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
    pub kwai_handle: Option<String>,
    pub ideas_generated: i32,
    pub subscription_start: Option<DateTime<Utc>>,
    pub subscription_expires: Option<DateTime<Utc>>,
    pub total_paid: f64,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub is_active: bool,
}

impl From<UserEntity> for UserDto {
    fn from(value: UserEntity) -> Self {
        let plan = value.plan();
        Self {
            id: value.id,
            email: value.email,
            name: value.name,
            profile_pic: value.profile_pic,
            plan,
            instagram_handle: value.instagram_handle,
            tiktok_handle: value.tiktok_handle,
            kwai_handle: value.kwai_handle,
            ideas_generated: value.ideas_generated,
            subscription_start: value.subscription_started_at,
            subscription_expires: value.subscription_expires_at,
            total_paid: minor_to_amount(value.total_paid_minor.into()),
            created_at: value.created_at,
            last_active: value.last_active,
            is_active: value.is_active,
        }
    }
}
