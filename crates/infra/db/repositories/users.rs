use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{InsertUserEntity, UpdateUserPlanEntity, UserEntity},
        repositories::users::UserRepository,
        value_objects::{admin::UserStatsModel, enums::user_plans::UserPlan},
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::users},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::id.eq(user_id))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }

    async fn insert_if_absent(&self, user: InsertUserEntity) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The unique index on email decides the race between concurrent creates.
        insert_into(users::table)
            .values(&user)
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)?;

        let stored = users::table
            .filter(users::email.eq(&user.email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)?;

        Ok(stored)
    }

    async fn touch_last_active(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = update(users::table)
            .filter(users::id.eq(user_id))
            .set(users::last_active.eq(Utc::now()))
            .returning(UserEntity::as_returning())
            .get_result::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }

    async fn increment_ideas_generated(&self, user_id: Uuid, count: i32) -> Result<i32> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = update(users::table)
            .filter(users::id.eq(user_id))
            .set((
                users::ideas_generated.eq(users::ideas_generated + count),
                users::last_active.eq(Utc::now()),
            ))
            .returning(users::ideas_generated)
            .get_result::<i32>(&mut conn)?;

        Ok(total)
    }

    async fn update_plan(&self, user_id: Uuid, changes: UpdateUserPlanEntity) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(users::table)
            .filter(users::id.eq(user_id))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn add_total_paid(&self, user_id: Uuid, amount_minor: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(users::table)
            .filter(users::id.eq(user_id))
            .set(users::total_paid_minor.eq(users::total_paid_minor + amount_minor))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = users::table
            .order(users::created_at.desc())
            .limit(limit)
            .select(UserEntity::as_select())
            .load::<UserEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn user_stats(
        &self,
        active_since: DateTime<Utc>,
        signed_up_since: DateTime<Utc>,
    ) -> Result<UserStatsModel> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total_users = users::table.count().get_result::<i64>(&mut conn)?;
        let premium_users = users::table
            .filter(users::plan.eq(UserPlan::Premium.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;
        let active_users = users::table
            .filter(users::last_active.ge(active_since))
            .count()
            .get_result::<i64>(&mut conn)?;
        let recent_signups = users::table
            .filter(users::created_at.ge(signed_up_since))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(UserStatsModel {
            total_users,
            premium_users,
            active_users,
            recent_signups,
        })
    }
}
