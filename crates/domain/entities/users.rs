use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::user_plans::UserPlan, infra::db::postgres::schema::users,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub profile_pic: Option<String>,
    pub plan: String,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
    pub kwai_handle: Option<String>,
    pub ideas_generated: i32,
    pub subscription_started_at: Option<DateTime<Utc>>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub total_paid_minor: i32,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub is_active: bool,
}

impl UserEntity {
    /// Unknown values stored in `plan` are treated as the free tier.
    pub fn plan(&self) -> UserPlan {
        UserPlan::from_str(&self.plan).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct InsertUserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub profile_pic: Option<String>,
    pub plan: String,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
    pub kwai_handle: Option<String>,
    pub ideas_generated: i32,
    pub total_paid_minor: i32,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub is_active: bool,
}

/// Plan transition written by admin overrides, `/upgrade-plan` and completed payments.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct UpdateUserPlanEntity {
    pub plan: String,
    pub subscription_started_at: Option<DateTime<Utc>>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
}
