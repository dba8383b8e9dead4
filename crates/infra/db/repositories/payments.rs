use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, dsl::sum, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{NewPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::enums::payment_statuses::PaymentStatus,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::payments},
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_payment(&self, payment: NewPaymentEntity) -> Result<PaymentEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(payments::table)
            .values(&payment)
            .returning(PaymentEntity::as_returning())
            .get_result::<PaymentEntity>(&mut conn)?;

        Ok(row)
    }

    async fn update_status(&self, payment_id: Uuid, status: String) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(payments::table)
            .filter(payments::id.eq(payment_id))
            .set((
                payments::status.eq(status),
                payments::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_payments(&self, limit: i64) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .order(payments::created_at.desc())
            .limit(limit)
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn completed_revenue_minor(&self, since: Option<DateTime<Utc>>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = payments::table
            .select(sum(payments::amount_minor))
            .filter(payments::status.eq(PaymentStatus::Completed.as_str()))
            .into_boxed();

        if let Some(since) = since {
            query = query.filter(payments::created_at.ge(since));
        }

        let total = query.get_result::<Option<i64>>(&mut conn)?;

        Ok(total.unwrap_or(0))
    }
}
