pub mod content_ideas;
pub mod payments;
pub mod profile_analyses;
pub mod users;
