/// Cumulative ideas a free-plan user may generate.
pub const FREE_IDEA_LIMIT: i32 = 10;

/// Every generation request yields exactly this many ideas.
pub const IDEAS_PER_BATCH: usize = 5;

/// Premium price in minor units (R$ 29,90).
pub const PREMIUM_PRICE_MINOR: i32 = 2990;

pub const PREMIUM_CURRENCY: &str = "BRL";

pub const PREMIUM_DURATION_DAYS: i64 = 30;
