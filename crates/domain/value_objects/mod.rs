pub mod admin;
pub mod content_ideas;
pub mod enums;
pub mod payments;
pub mod plans;
pub mod profile_analyses;
pub mod users;
