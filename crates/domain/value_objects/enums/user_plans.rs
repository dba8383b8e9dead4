use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserPlan {
    #[default]
    Free,
    Premium,
}

impl UserPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserPlan::Free => "free",
            UserPlan::Premium => "premium",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(UserPlan::Free),
            "premium" => Some(UserPlan::Premium),
            _ => None,
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, UserPlan::Premium)
    }
}

impl Display for UserPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
