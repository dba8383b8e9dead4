use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::content_ideas::ContentIdeaEntity,
    value_objects::enums::content_types::ContentType,
};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateIdeasModel {
    pub user_id: Uuid,
    pub topic: String,
}

/// Normalized idea before it is attached to a user and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    pub title: String,
    pub script: String,
    pub content_type: ContentType,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentIdeaDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub title: String,
    pub script: String,
    pub content_type: String,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContentIdeaEntity> for ContentIdeaDto {
    fn from(value: ContentIdeaEntity) -> Self {
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
