use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::Utc;
use crates::{
    domain::{
        entities::payments::NewPaymentEntity,
        repositories::{payments::PaymentRepository, users::UserRepository},
        value_objects::{
            enums::{
                payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
                user_plans::UserPlan,
            },
            payments::{PurchasePremiumModel, PurchaseResultDto},
            plans::{PREMIUM_CURRENCY, PREMIUM_PRICE_MINOR},
        },
    },
    payments::simulated_processor::{PaymentDecision, SimulatedPaymentProcessor, mask_payment_data},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::plans::plan_transition;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, method: PaymentMethod, payment_data: Value) -> AnyResult<PaymentDecision>;
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentProcessor {
    async fn process(&self, method: PaymentMethod, payment_data: Value) -> AnyResult<PaymentDecision> {
        Ok(self.evaluate(method, &payment_data))
    }
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("user not found")]
    UserNotFound,
    #[error("unsupported payment method: {0}")]
    UnsupportedMethod(String),
    #[error("unsupported plan: {0}")]
    UnsupportedPlan(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::UserNotFound => StatusCode::NOT_FOUND,
            PaymentError::UnsupportedMethod(_) | PaymentError::UnsupportedPlan(_) => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<U, Pay, Proc>
where
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    Proc: PaymentProcessor + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    payment_repo: Arc<Pay>,
    processor: Arc<Proc>,
}

impl<U, Pay, Proc> PaymentUseCase<U, Pay, Proc>
where
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    Proc: PaymentProcessor + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, payment_repo: Arc<Pay>, processor: Arc<Proc>) -> Self {
        Self {
            user_repo,
            payment_repo,
            processor,
        }
    }

    /// Records a pending payment, asks the processor, then settles the payment
    /// and, when approved, moves the user to premium. Each step is its own
    /// statement; a crash in between leaves the payment `pending`.
    pub async fn purchase_premium(&self, model: PurchasePremiumModel) -> UseCaseResult<PurchaseResultDto> {
        let user_id = model.user_id;
        info!(%user_id, payment_method = %model.payment_method, "payments: premium purchase requested");

        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to load user");
                PaymentError::Internal(err)
            })?
            .ok_or(PaymentError::UserNotFound)?;

        if let Some(plan) = model.plan.as_deref() {
            if UserPlan::from_str(plan) != Some(UserPlan::Premium) {
                warn!(%user_id, plan, "payments: purchase for non-premium plan");
                return Err(PaymentError::UnsupportedPlan(plan.to_string()));
            }
        }

        let method = PaymentMethod::from_str(&model.payment_method).ok_or_else(|| {
            warn!(%user_id, payment_method = %model.payment_method, "payments: unsupported method");
            PaymentError::UnsupportedMethod(model.payment_method.clone())
        })?;

        let payment = self
            .payment_repo
            .record_payment(NewPaymentEntity {
                user_id,
                amount_minor: PREMIUM_PRICE_MINOR,
                currency: PREMIUM_CURRENCY.to_string(),
                payment_method: method.to_string(),
                payment_data: mask_payment_data(method, &model.payment_data),
                status: PaymentStatus::Pending.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to record payment");
                PaymentError::Internal(err)
            })?;
        let payment_id = payment.id;

        let decision = match self.processor.process(method, model.payment_data).await {
            Ok(decision) => decision,
            Err(err) => {
                error!(%user_id, %payment_id, processor_error = ?err, "payments: processor failed");
                self.settle(payment_id, PaymentStatus::Failed).await?;
                return Err(PaymentError::Internal(err));
            }
        };

        match decision {
            PaymentDecision::Approved => {
                self.settle(payment_id, PaymentStatus::Completed).await?;
                self.activate_premium(user_id).await?;

                info!(%user_id, %payment_id, "payments: premium activated");
                Ok(PurchaseResultDto {
                    success: true,
                    message: "Pagamento aprovado! Bem-vindo ao Premium 👻".to_string(),
                    payment_id,
                    status: PaymentStatus::Completed,
                })
            }
            PaymentDecision::Declined(reason) => {
                self.settle(payment_id, PaymentStatus::Failed).await?;

                warn!(%user_id, %payment_id, reason = %reason, "payments: payment declined");
                Ok(PurchaseResultDto {
                    success: false,
                    message: format!("Pagamento recusado: {reason}"),
                    payment_id,
                    status: PaymentStatus::Failed,
                })
            }
        }
    }

    async fn settle(&self, payment_id: Uuid, status: PaymentStatus) -> UseCaseResult<()> {
        self.payment_repo
            .update_status(payment_id, status.to_string())
            .await
            .map_err(|err| {
                error!(%payment_id, %status, db_error = ?err, "payments: failed to update status");
                PaymentError::Internal(err)
            })
    }

    async fn activate_premium(&self, user_id: Uuid) -> UseCaseResult<()> {
        let updated = self
            .user_repo
            .update_plan(user_id, plan_transition(UserPlan::Premium, Utc::now()))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to upgrade plan");
                PaymentError::Internal(err)
            })?;
        if !updated {
            return Err(PaymentError::UserNotFound);
        }

        self.user_repo
            .add_total_paid(user_id, PREMIUM_PRICE_MINOR)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to add total paid");
                PaymentError::Internal(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::quota_policy::tests::sample_user;
    use crates::domain::{
        entities::payments::PaymentEntity,
        repositories::{payments::MockPaymentRepository, users::MockUserRepository},
    };
    use mockall::predicate::eq;
    use serde_json::json;

    fn stored_payment(insert: NewPaymentEntity) -> PaymentEntity {
        let now = Utc::now();
        PaymentEntity {
            id: Uuid::new_v4(),
            user_id: insert.user_id,
            amount_minor: insert.amount_minor,
            currency: insert.currency,
            payment_method: insert.payment_method,
            payment_data: insert.payment_data,
            status: insert.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn known_user_repo() -> MockUserRepository {
        let user = sample_user(UserPlan::Free, 4);
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
    }

    fn purchase(method: &str, payment_data: Value) -> PurchasePremiumModel {
        PurchasePremiumModel {
            user_id: Uuid::new_v4(),
            plan: Some("premium".to_string()),
            payment_method: method.to_string(),
            payment_data,
        }
    }

    #[tokio::test]
    async fn approved_card_completes_payment_and_upgrades_user() {
        let mut user_repo = known_user_repo();
        user_repo
            .expect_update_plan()
            .withf(|_, changes| changes.plan == "premium")
            .times(1)
            .returning(|_, _| Ok(true));
        user_repo
            .expect_add_total_paid()
            .withf(|_, amount| *amount == PREMIUM_PRICE_MINOR)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .withf(|insert| {
                insert.status == "pending"
                    && insert.amount_minor == 2990
                    && insert.currency == "BRL"
                    && insert.payment_data.get("cvv").is_none()
            })
            .times(1)
            .returning(|insert| Ok(stored_payment(insert)));
        payment_repo
            .expect_update_status()
            .withf(|_, status| status == "completed")
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = PaymentUseCase::new(
            Arc::new(user_repo),
            Arc::new(payment_repo),
            Arc::new(SimulatedPaymentProcessor::new()),
        );
        let result = usecase
            .purchase_premium(purchase(
                "card",
                json!({"card_number": "4111 1111 1111 1111", "expiry": "12/30", "cvv": "123"}),
            ))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn declined_crypto_marks_payment_failed_and_keeps_plan() {
        let mut user_repo = known_user_repo();
        user_repo.expect_update_plan().never();
        user_repo.expect_add_total_paid().never();

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .returning(|insert| Ok(stored_payment(insert)));
        payment_repo
            .expect_update_status()
            .withf(|_, status| status == "failed")
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = PaymentUseCase::new(
            Arc::new(user_repo),
            Arc::new(payment_repo),
            Arc::new(SimulatedPaymentProcessor::new()),
        );
        let result = usecase
            .purchase_premium(purchase("crypto", json!({"type": "bitcoin", "address": "abc"})))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn processor_error_fails_payment() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .returning(|insert| Ok(stored_payment(insert)));
        payment_repo
            .expect_update_status()
            .with(mockall::predicate::always(), eq("failed".to_string()))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut processor = MockPaymentProcessor::new();
        processor
            .expect_process()
            .returning(|_, _| Err(anyhow::anyhow!("gateway down")));

        let usecase = PaymentUseCase::new(
            Arc::new(known_user_repo()),
            Arc::new(payment_repo),
            Arc::new(processor),
        );
        let err = usecase
            .purchase_premium(purchase("card", json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Internal(_)));
    }

    #[tokio::test]
    async fn unknown_method_is_bad_request() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_payment().never();

        let usecase = PaymentUseCase::new(
            Arc::new(known_user_repo()),
            Arc::new(payment_repo),
            Arc::new(MockPaymentProcessor::new()),
        );
        let err = usecase
            .purchase_premium(purchase("pix", json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::UnsupportedMethod(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = PaymentUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockPaymentProcessor::new()),
        );
        let err = usecase
            .purchase_premium(purchase("card", json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }
}
