use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
    Kwai,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Kwai => "Kwai",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let platform = match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::Kwai => "kwai",
        };
        write!(f, "{}", platform)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "kwai" => Ok(Platform::Kwai),
            other => Err(format!("Unsupported platform: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_platforms_case_insensitively() {
        assert_eq!("Instagram".parse::<Platform>(), Ok(Platform::Instagram));
        assert_eq!(" TIKTOK ".parse::<Platform>(), Ok(Platform::TikTok));
        assert_eq!("kwai".parse::<Platform>(), Ok(Platform::Kwai));
        assert!("twitch".parse::<Platform>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for platform in [Platform::Instagram, Platform::TikTok, Platform::Kwai] {
            assert_eq!(platform.to_string().parse::<Platform>(), Ok(platform));
        }
    }
}
