use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::content_ideas::{ContentIdeaEntity, InsertContentIdeaEntity},
        repositories::content_ideas::ContentIdeaRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::content_ideas},
};

pub struct ContentIdeaPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ContentIdeaPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ContentIdeaRepository for ContentIdeaPostgres {
    async fn save_all(&self, ideas: Vec<InsertContentIdeaEntity>) -> Result<Vec<ContentIdeaEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = insert_into(content_ideas::table)
            .values(&ideas)
            .returning(ContentIdeaEntity::as_returning())
            .get_results::<ContentIdeaEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn list_by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ContentIdeaEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = content_ideas::table
            .filter(content_ideas::user_id.eq(user_id))
            .order((content_ideas::created_at.desc(), content_ideas::id.asc()))
            .limit(limit)
            .select(ContentIdeaEntity::as_select())
            .load::<ContentIdeaEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn delete_by_id(&self, idea_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(content_ideas::table)
            .filter(content_ideas::id.eq(idea_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn count_all(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = content_ideas::table
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}
