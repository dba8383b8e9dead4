use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::content_ideas;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = content_ideas)]
pub struct ContentIdeaEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub title: String,
    pub script: String,
    pub content_type: String,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = content_ideas)]
pub struct InsertContentIdeaEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub title: String,
    pub script: String,
    pub content_type: String,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<InsertContentIdeaEntity> for ContentIdeaEntity {
    fn from(value: InsertContentIdeaEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            topic: value.topic,
            title: value.title,
            script: value.script,
            content_type: value.content_type,
            hashtags: value.hashtags,
            created_at: value.created_at,
        }
    }
}
