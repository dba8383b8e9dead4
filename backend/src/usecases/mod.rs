pub mod admin;
pub mod analysis_normalizer;
pub mod content_ideas;
pub mod idea_normalizer;
pub mod llm_gateway;
pub mod niche;
pub mod payments;
pub mod plans;
pub mod profile_analyses;
pub mod prompts;
pub mod quota_policy;
pub mod users;
