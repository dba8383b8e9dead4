use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStatsModel {
    pub total_users: i64,
    pub premium_users: i64,
    pub active_users: i64,
    pub recent_signups: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardDto {
    pub total_users: i64,
    pub premium_users: i64,
    pub free_users: i64,
    pub active_users: i64,
    pub recent_signups: i64,
    pub total_ideas: i64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub conversion_rate: f64,
}
