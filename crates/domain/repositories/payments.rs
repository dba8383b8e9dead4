use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{NewPaymentEntity, PaymentEntity};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn record_payment(&self, payment: NewPaymentEntity) -> Result<PaymentEntity>;

    async fn update_status(&self, payment_id: Uuid, status: String) -> Result<()>;

    /// Newest first.
    async fn list_payments(&self, limit: i64) -> Result<Vec<PaymentEntity>>;

    /// Sum of completed payments in minor units, optionally restricted to `since` onwards.
    async fn completed_revenue_minor(&self, since: Option<DateTime<Utc>>) -> Result<i64>;
}
