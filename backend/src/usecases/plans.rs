use chrono::{DateTime, Duration, Utc};
use crates::domain::{
    entities::users::UpdateUserPlanEntity,
    value_objects::{enums::user_plans::UserPlan, plans::PREMIUM_DURATION_DAYS},
};

/// Changeset for moving a user onto `plan` at `now`. Premium opens a fresh
/// 30-day window; free clears the subscription dates.
pub fn plan_transition(plan: UserPlan, now: DateTime<Utc>) -> UpdateUserPlanEntity {
    match plan {
        UserPlan::Premium => UpdateUserPlanEntity {
            plan: plan.to_string(),
            subscription_started_at: Some(now),
            subscription_expires_at: Some(now + Duration::days(PREMIUM_DURATION_DAYS)),
        },
        UserPlan::Free => UpdateUserPlanEntity {
            plan: plan.to_string(),
            subscription_started_at: None,
            subscription_expires_at: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_runs_for_thirty_days() {
        let now = Utc::now();
        let changes = plan_transition(UserPlan::Premium, now);
        assert_eq!(changes.plan, "premium");
        assert_eq!(changes.subscription_started_at, Some(now));
        assert_eq!(changes.subscription_expires_at, Some(now + Duration::days(30)));
    }

    #[test]
    fn free_clears_subscription_dates() {
        let changes = plan_transition(UserPlan::Free, Utc::now());
        assert_eq!(changes.plan, "free");
        assert!(changes.subscription_started_at.is_none());
        assert!(changes.subscription_expires_at.is_none());
    }
}
