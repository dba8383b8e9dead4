use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    Reels,
    Post,
    Stories,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Reels => "Reels",
            ContentType::Post => "Post",
            ContentType::Stories => "Stories",
        }
    }

    /// Lenient match used for model output: case-insensitive, singular forms accepted.
    pub fn from_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "reels" | "reel" => Some(ContentType::Reels),
            "post" | "posts" | "carrossel" | "carousel" => Some(ContentType::Post),
            "stories" | "story" => Some(ContentType::Stories),
            _ => None,
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_match_ignores_case_and_plural() {
        assert_eq!(ContentType::from_loose("REELS"), Some(ContentType::Reels));
        assert_eq!(ContentType::from_loose(" story "), Some(ContentType::Stories));
        assert_eq!(ContentType::from_loose("Post"), Some(ContentType::Post));
        assert_eq!(ContentType::from_loose("Reels|Post|Stories"), None);
    }
}
