use std::sync::Arc;

use chrono::{Duration, Utc};
use crates::domain::{
    entities::content_ideas::InsertContentIdeaEntity,
    repositories::{content_ideas::ContentIdeaRepository, users::UserRepository},
    value_objects::content_ideas::{ContentIdeaDto, GenerateIdeasModel},
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    idea_normalizer::{DraftSource, NormalizedIdeas, normalize_ideas},
    llm_gateway::LlmGateway,
    prompts::{IDEA_SYSTEM_INSTRUCTION, build_idea_user_message},
    quota_policy::{QuotaDecision, QuotaPolicy},
};

pub const IDEA_LIST_LIMIT: i64 = 100;

#[derive(Debug, Error)]
pub enum ContentIdeaError {
    #[error("user not found")]
    UserNotFound,
    #[error("free plan limit reached ({used}/{limit} ideas), upgrade to premium")]
    QuotaExceeded { used: i32, limit: i32 },
    #[error("idea not found")]
    IdeaNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ContentIdeaError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ContentIdeaError::UserNotFound | ContentIdeaError::IdeaNotFound => {
                StatusCode::NOT_FOUND
            }
            ContentIdeaError::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            ContentIdeaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ContentIdeaError>;

pub struct ContentIdeaUseCase<U, I, L>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    idea_repo: Arc<I>,
    llm: Arc<L>,
    quota_policy: QuotaPolicy<U>,
    max_output_tokens: u32,
}

impl<U, I, L> ContentIdeaUseCase<U, I, L>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    L: LlmGateway + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, idea_repo: Arc<I>, llm: Arc<L>, max_output_tokens: u32) -> Self {
        Self {
            quota_policy: QuotaPolicy::new(Arc::clone(&user_repo)),
            user_repo,
            idea_repo,
            llm,
            max_output_tokens,
        }
    }

    pub async fn generate_ideas(&self, model: GenerateIdeasModel) -> UseCaseResult<Vec<ContentIdeaDto>> {
        let user_id = model.user_id;
        let topic = model.topic.trim().to_string();
        info!(%user_id, topic = %topic, "content_ideas: generation requested");

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "content_ideas: failed to load user");
                ContentIdeaError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%user_id, "content_ideas: unknown user");
                ContentIdeaError::UserNotFound
            })?;

        if let QuotaDecision::Deny { used, limit } = self.quota_policy.authorize(&user) {
            warn!(%user_id, used, limit, "content_ideas: quota exceeded");
            return Err(ContentIdeaError::QuotaExceeded { used, limit });
        }

        let normalized = match self
            .llm
            .generate(
                IDEA_SYSTEM_INSTRUCTION.to_string(),
                build_idea_user_message(&topic, &user),
                self.max_output_tokens,
            )
            .await
        {
            Ok(raw) => normalize_ideas(&raw, &topic),
            Err(err) => {
                warn!(%user_id, llm_error = ?err, "content_ideas: llm call failed, using fallback");
                NormalizedIdeas::fallback(&topic)
            }
        };

        if normalized.source == DraftSource::Fallback {
            warn!(%user_id, topic = %topic, "content_ideas: serving fallback ideas");
        }

        // Listing is newest first, so each later idea is one microsecond older
        // to keep the batch in generation order.
        let now = Utc::now();
        let inserts: Vec<InsertContentIdeaEntity> = normalized
            .drafts
            .into_iter()
            .zip(0_i64..)
            .map(|(draft, position)| InsertContentIdeaEntity {
                id: Uuid::new_v4(),
                user_id,
                topic: topic.clone(),
                title: draft.title,
                script: draft.script,
                content_type: draft.content_type.to_string(),
                hashtags: draft.hashtags,
                created_at: now - Duration::microseconds(position),
            })
            .collect();

        let saved = self.idea_repo.save_all(inserts).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "content_ideas: failed to persist ideas");
            ContentIdeaError::Internal(err)
        })?;

        let generated = i32::try_from(saved.len()).map_err(anyhow::Error::from)?;
        let total = self
            .quota_policy
            .record(user_id, generated)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "content_ideas: failed to record usage");
                ContentIdeaError::Internal(err)
            })?;

        info!(%user_id, generated, total, "content_ideas: ideas generated");
        Ok(saved.into_iter().map(ContentIdeaDto::from).collect())
    }

    pub async fn list_ideas(&self, user_id: Uuid) -> UseCaseResult<Vec<ContentIdeaDto>> {
        let ideas = self
            .idea_repo
            .list_by_user(user_id, IDEA_LIST_LIMIT)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "content_ideas: failed to list ideas");
                ContentIdeaError::Internal(err)
            })?;

        Ok(ideas.into_iter().map(ContentIdeaDto::from).collect())
    }

    pub async fn delete_idea(&self, idea_id: Uuid) -> UseCaseResult<()> {
        let deleted = self.idea_repo.delete_by_id(idea_id).await.map_err(|err| {
            error!(%idea_id, db_error = ?err, "content_ideas: failed to delete idea");
            ContentIdeaError::Internal(err)
        })?;

        if !deleted {
            warn!(%idea_id, "content_ideas: delete of unknown idea");
            return Err(ContentIdeaError::IdeaNotFound);
        }

        info!(%idea_id, "content_ideas: idea deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::{
        idea_normalizer::fallback_ideas, llm_gateway::MockLlmGateway,
        quota_policy::tests::sample_user,
    };
    use crates::domain::{
        entities::content_ideas::ContentIdeaEntity,
        repositories::{content_ideas::MockContentIdeaRepository, users::MockUserRepository},
        value_objects::enums::user_plans::UserPlan,
    };
    use mockall::predicate::eq;

    fn echo_save_all(idea_repo: &mut MockContentIdeaRepository) {
        idea_repo.expect_save_all().returning(|inserts| {
            Ok(inserts.into_iter().map(ContentIdeaEntity::from).collect())
        });
    }

    fn usecase(
        user_repo: MockUserRepository,
        idea_repo: MockContentIdeaRepository,
        llm: MockLlmGateway,
    ) -> ContentIdeaUseCase<MockUserRepository, MockContentIdeaRepository, MockLlmGateway> {
        ContentIdeaUseCase::new(Arc::new(user_repo), Arc::new(idea_repo), Arc::new(llm), 4000)
    }

    #[tokio::test]
    async fn fitness_topic_for_new_free_user_yields_five_ideas_and_counts_them() {
        let user = sample_user(UserPlan::Free, 0);
        let user_id = user.id;

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_increment_ideas_generated()
            .with(eq(user_id), eq(5))
            .times(1)
            .returning(|_, count| Ok(count));

        let mut idea_repo = MockContentIdeaRepository::new();
        echo_save_all(&mut idea_repo);

        let mut llm = MockLlmGateway::new();
        llm.expect_generate()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("upstream unavailable")));

        let ideas = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id,
                topic: "fitness".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(ideas.len(), 5);
        for idea in &ideas {
            assert_eq!(idea.topic, "fitness");
            assert_eq!(idea.user_id, user_id);
            assert!(!idea.title.is_empty());
            assert!(!idea.script.is_empty());
            assert!(["Reels", "Post", "Stories"].contains(&idea.content_type.as_str()));
            assert!(!idea.hashtags.is_empty());
        }
        let expected: Vec<String> = fallback_ideas("fitness").into_iter().map(|d| d.title).collect();
        let titles: Vec<String> = ideas.into_iter().map(|idea| idea.title).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn model_output_is_normalized_and_persisted() {
        let user = sample_user(UserPlan::Premium, 250);
        let user_id = user.id;

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_increment_ideas_generated()
            .returning(|_, count| Ok(250 + count));

        let mut idea_repo = MockContentIdeaRepository::new();
        echo_save_all(&mut idea_repo);

        let mut llm = MockLlmGateway::new();
        llm.expect_generate()
            .withf(|system, user_message, max_tokens| {
                system == IDEA_SYSTEM_INSTRUCTION
                    && user_message.ends_with("sobre: café")
                    && *max_tokens == 4000
            })
            .returning(|_, _, _| {
                Ok("```json\n{\"ideas\": [{\"title\": \"Latte art\", \"script\": \"1. a\", \"content_type\": \"post\", \"hashtags\": [\"cafe\"]}]}\n```".to_string())
            });

        let ideas = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id,
                topic: "  café ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(ideas.len(), 5);
        assert_eq!(ideas[0].title, "Latte art");
        assert_eq!(ideas[0].content_type, "Post");
        assert_eq!(ideas[0].hashtags, vec!["#cafe"]);
        assert_eq!(ideas[0].topic, "café");
    }

    #[tokio::test]
    async fn batch_timestamps_keep_generation_order_when_listed_newest_first() {
        let user = sample_user(UserPlan::Premium, 0);

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_increment_ideas_generated()
            .returning(|_, count| Ok(count));

        let mut idea_repo = MockContentIdeaRepository::new();
        echo_save_all(&mut idea_repo);

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().returning(|_, _, _| Ok("nada".to_string()));

        let ideas = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id: Uuid::new_v4(),
                topic: "viagem".to_string(),
            })
            .await
            .unwrap();

        let mut listed = ideas.clone();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let titles: Vec<&str> = ideas.iter().map(|idea| idea.title.as_str()).collect();
        let listed_titles: Vec<&str> = listed.iter().map(|idea| idea.title.as_str()).collect();
        assert_eq!(listed_titles, titles);
        assert!(ideas.windows(2).all(|pair| pair[0].created_at > pair[1].created_at));
    }

    #[tokio::test]
    async fn failed_persistence_does_not_count_usage() {
        let user = sample_user(UserPlan::Free, 0);

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo.expect_increment_ideas_generated().never();

        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo
            .expect_save_all()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection reset")));

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().returning(|_, _, _| Ok("nada".to_string()));

        let err = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id: Uuid::new_v4(),
                topic: "viagem".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentIdeaError::Internal(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn failed_usage_increment_after_save_is_internal_and_keeps_ideas() {
        let user = sample_user(UserPlan::Free, 0);
        let user_id = user.id;

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_increment_ideas_generated()
            .with(eq(user_id), eq(5))
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("statement timeout")));

        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo
            .expect_save_all()
            .times(1)
            .returning(|inserts| Ok(inserts.into_iter().map(ContentIdeaEntity::from).collect()));
        idea_repo.expect_delete_by_id().never();

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().returning(|_, _, _| Ok("nada".to_string()));

        let err = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id,
                topic: "viagem".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentIdeaError::Internal(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn free_user_with_nine_ideas_may_generate_once_more() {
        let user = sample_user(UserPlan::Free, 9);

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_increment_ideas_generated()
            .times(1)
            .returning(|_, count| Ok(9 + count));

        let mut idea_repo = MockContentIdeaRepository::new();
        echo_save_all(&mut idea_repo);

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().returning(|_, _, _| Ok("nada".to_string()));

        let result = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id: Uuid::new_v4(),
                topic: "viagem".to_string(),
            })
            .await;

        assert_eq!(result.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn free_user_at_limit_is_denied_before_calling_model() {
        let user = sample_user(UserPlan::Free, 10);

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo.expect_increment_ideas_generated().never();

        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo.expect_save_all().never();

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().never();

        let err = usecase(user_repo, idea_repo, llm)
            .generate_ideas(GenerateIdeasModel {
                user_id: Uuid::new_v4(),
                topic: "viagem".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentIdeaError::QuotaExceeded { used: 10, limit: 10 }));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().returning(|_| Ok(None));

        let mut llm = MockLlmGateway::new();
        llm.expect_generate().never();

        let err = usecase(user_repo, MockContentIdeaRepository::new(), llm)
            .generate_ideas(GenerateIdeasModel {
                user_id: Uuid::new_v4(),
                topic: "viagem".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentIdeaError::UserNotFound));
    }

    #[tokio::test]
    async fn listing_is_bounded() {
        let user_id = Uuid::new_v4();
        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo
            .expect_list_by_user()
            .with(eq(user_id), eq(IDEA_LIST_LIMIT))
            .returning(|_, _| Ok(vec![]));

        let ideas = usecase(MockUserRepository::new(), idea_repo, MockLlmGateway::new())
            .list_ideas(user_id)
            .await
            .unwrap();

        assert!(ideas.is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_idea_is_not_found() {
        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo.expect_delete_by_id().returning(|_| Ok(false));

        let err = usecase(MockUserRepository::new(), idea_repo, MockLlmGateway::new())
            .delete_idea(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, ContentIdeaError::IdeaNotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_known_idea_succeeds() {
        let idea_id = Uuid::new_v4();
        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo
            .expect_delete_by_id()
            .with(eq(idea_id))
            .times(1)
            .returning(|_| Ok(true));

        usecase(MockUserRepository::new(), idea_repo, MockLlmGateway::new())
            .delete_idea(idea_id)
            .await
            .unwrap();
    }
}
