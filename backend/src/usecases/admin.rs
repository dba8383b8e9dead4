use std::sync::Arc;

use chrono::{Duration, Utc};
use crates::domain::{
    repositories::{
        content_ideas::ContentIdeaRepository, payments::PaymentRepository, users::UserRepository,
    },
    value_objects::{
        admin::{AdminLoginModel, DashboardDto},
        enums::user_plans::UserPlan,
        payments::{PaymentDto, minor_to_amount},
        users::UserDto,
    },
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::plans::plan_transition;
use crate::{
    auth::{AdminClaims, issue_admin_token, validate_admin_token},
    config::config_model::AdminSecret,
};

pub const ACTIVE_WINDOW_DAYS: i64 = 30;
pub const RECENT_SIGNUP_DAYS: i64 = 7;
pub const REVENUE_WINDOW_DAYS: i64 = 30;
pub const ADMIN_LIST_LIMIT: i64 = 1000;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("invalid admin credentials")]
    InvalidCredentials,
    #[error("admin token missing or invalid")]
    Unauthorized,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AdminError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AdminError::InvalidCredentials | AdminError::Unauthorized => StatusCode::UNAUTHORIZED,
            AdminError::UserNotFound => StatusCode::NOT_FOUND,
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminLoginDto {
    pub success: bool,
    pub token: String,
}

pub struct AdminUseCase<U, I, Pay>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    idea_repo: Arc<I>,
    payment_repo: Arc<Pay>,
    admin_secret: AdminSecret,
}

impl<U, I, Pay> AdminUseCase<U, I, Pay>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        idea_repo: Arc<I>,
        payment_repo: Arc<Pay>,
        admin_secret: AdminSecret,
    ) -> Self {
        Self {
            user_repo,
            idea_repo,
            payment_repo,
            admin_secret,
        }
    }

    pub fn login(&self, model: AdminLoginModel) -> UseCaseResult<AdminLoginDto> {
        if model.email.trim() != self.admin_secret.email || model.password != self.admin_secret.password {
            warn!("admin: login rejected");
            return Err(AdminError::InvalidCredentials);
        }

        let token = issue_admin_token(&self.admin_secret.email, &self.admin_secret.jwt_secret)?;
        info!("admin: login succeeded");
        Ok(AdminLoginDto {
            success: true,
            token,
        })
    }

    pub fn authorize(&self, token: &str) -> UseCaseResult<AdminClaims> {
        validate_admin_token(token, &self.admin_secret.jwt_secret).map_err(|err| {
            warn!(auth_error = %err, "admin: token rejected");
            AdminError::Unauthorized
        })
    }

    pub async fn dashboard(&self) -> UseCaseResult<DashboardDto> {
        let now = Utc::now();

        let stats = self
            .user_repo
            .user_stats(
                now - Duration::days(ACTIVE_WINDOW_DAYS),
                now - Duration::days(RECENT_SIGNUP_DAYS),
            )
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to load user stats");
                AdminError::Internal(err)
            })?;

        let total_ideas = self.idea_repo.count_all().await.map_err(|err| {
            error!(db_error = ?err, "admin: failed to count ideas");
            AdminError::Internal(err)
        })?;

        let total_revenue = self
            .payment_repo
            .completed_revenue_minor(None)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to sum revenue");
                AdminError::Internal(err)
            })?;
        let monthly_revenue = self
            .payment_repo
            .completed_revenue_minor(Some(now - Duration::days(REVENUE_WINDOW_DAYS)))
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to sum monthly revenue");
                AdminError::Internal(err)
            })?;

        Ok(DashboardDto {
            total_users: stats.total_users,
            premium_users: stats.premium_users,
            free_users: stats.total_users - stats.premium_users,
            active_users: stats.active_users,
            recent_signups: stats.recent_signups,
            total_ideas,
            total_revenue: minor_to_amount(total_revenue),
            monthly_revenue: minor_to_amount(monthly_revenue),
            conversion_rate: conversion_rate(stats.premium_users, stats.total_users),
        })
    }

    pub async fn list_users(&self) -> UseCaseResult<Vec<UserDto>> {
        let users = self
            .user_repo
            .list_users(ADMIN_LIST_LIMIT)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to list users");
                AdminError::Internal(err)
            })?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn list_payments(&self) -> UseCaseResult<Vec<PaymentDto>> {
        let payments = self
            .payment_repo
            .list_payments(ADMIN_LIST_LIMIT)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to list payments");
                AdminError::Internal(err)
            })?;

        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }

    pub async fn set_user_plan(&self, user_id: Uuid, plan: UserPlan) -> UseCaseResult<String> {
        let updated = self
            .user_repo
            .update_plan(user_id, plan_transition(plan, Utc::now()))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "admin: failed to override plan");
                AdminError::Internal(err)
            })?;

        if !updated {
            return Err(AdminError::UserNotFound);
        }

        info!(%user_id, %plan, "admin: plan overridden");
        Ok(format!("Usuário atualizado para {plan}"))
    }
}

/// Premium share of all users in percent, rounded to two decimals.
pub fn conversion_rate(premium_users: i64, total_users: i64) -> f64 {
    if total_users <= 0 {
        return 0.0;
    }
    let rate = premium_users as f64 / total_users as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        repositories::{
            content_ideas::MockContentIdeaRepository, payments::MockPaymentRepository,
            users::MockUserRepository,
        },
        value_objects::admin::UserStatsModel,
    };

    fn secret() -> AdminSecret {
        AdminSecret {
            email: "admin@shadoom.com".to_string(),
            password: "fantasma".to_string(),
            jwt_secret: "test-secret".to_string(),
        }
    }

    fn usecase(
        user_repo: MockUserRepository,
        idea_repo: MockContentIdeaRepository,
        payment_repo: MockPaymentRepository,
    ) -> AdminUseCase<MockUserRepository, MockContentIdeaRepository, MockPaymentRepository> {
        AdminUseCase::new(
            Arc::new(user_repo),
            Arc::new(idea_repo),
            Arc::new(payment_repo),
            secret(),
        )
    }

    fn empty_usecase() -> AdminUseCase<MockUserRepository, MockContentIdeaRepository, MockPaymentRepository> {
        usecase(
            MockUserRepository::new(),
            MockContentIdeaRepository::new(),
            MockPaymentRepository::new(),
        )
    }

    #[test]
    fn login_issues_token_that_authorizes() {
        let usecase = empty_usecase();
        let login = usecase
            .login(AdminLoginModel {
                email: "admin@shadoom.com".to_string(),
                password: "fantasma".to_string(),
            })
            .unwrap();

        assert!(login.success);
        let claims = usecase.authorize(&login.token).unwrap();
        assert_eq!(claims.sub, "admin@shadoom.com");
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let err = empty_usecase()
            .login(AdminLoginModel {
                email: "admin@shadoom.com".to_string(),
                password: "errada".to_string(),
            })
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(matches!(
            empty_usecase().authorize("not-a-jwt"),
            Err(AdminError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn dashboard_aggregates_metrics() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_user_stats().returning(|_, _| {
            Ok(UserStatsModel {
                total_users: 3,
                premium_users: 1,
                active_users: 2,
                recent_signups: 1,
            })
        });

        let mut idea_repo = MockContentIdeaRepository::new();
        idea_repo.expect_count_all().returning(|| Ok(15));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_completed_revenue_minor()
            .returning(|since| Ok(if since.is_some() { 2990 } else { 5980 }));

        let dashboard = usecase(user_repo, idea_repo, payment_repo)
            .dashboard()
            .await
            .unwrap();

        assert_eq!(dashboard.free_users, 2);
        assert_eq!(dashboard.total_ideas, 15);
        assert_eq!(dashboard.total_revenue, 59.8);
        assert_eq!(dashboard.monthly_revenue, 29.9);
        assert_eq!(dashboard.conversion_rate, 33.33);
    }

    #[test]
    fn conversion_rate_handles_empty_user_base() {
        assert_eq!(conversion_rate(0, 0), 0.0);
        assert_eq!(conversion_rate(1, 4), 25.0);
        assert_eq!(conversion_rate(2, 3), 66.67);
    }

    #[tokio::test]
    async fn downgrade_of_unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_update_plan()
            .withf(|_, changes| changes.plan == "free")
            .returning(|_, _| Ok(false));

        let err = usecase(
            user_repo,
            MockContentIdeaRepository::new(),
            MockPaymentRepository::new(),
        )
        .set_user_plan(Uuid::new_v4(), UserPlan::Free)
        .await
        .unwrap_err();

        assert!(matches!(err, AdminError::UserNotFound));
    }
}
