use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::profile_analyses::{InsertProfileAnalysisEntity, ProfileAnalysisEntity},
        repositories::profile_analyses::ProfileAnalysisRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::profile_analyses},
};

pub struct ProfileAnalysisPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ProfileAnalysisPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProfileAnalysisRepository for ProfileAnalysisPostgres {
    async fn save(&self, analysis: InsertProfileAnalysisEntity) -> Result<ProfileAnalysisEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(profile_analyses::table)
            .values(&analysis)
            .returning(ProfileAnalysisEntity::as_returning())
            .get_result::<ProfileAnalysisEntity>(&mut conn)?;

        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ProfileAnalysisEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = profile_analyses::table
            .filter(profile_analyses::user_id.eq(user_id))
            .order(profile_analyses::created_at.desc())
            .limit(limit)
            .select(ProfileAnalysisEntity::as_select())
            .load::<ProfileAnalysisEntity>(&mut conn)?;

        Ok(rows)
    }
}
