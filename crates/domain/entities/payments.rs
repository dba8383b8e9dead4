use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_minor: i32,
    pub currency: String,
    pub payment_method: String,
    pub payment_data: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub user_id: Uuid,
    pub amount_minor: i32,
    pub currency: String,
    pub payment_method: String,
    pub payment_data: serde_json::Value,
    pub status: String,
}

// NewPaymentEntity is the application-facing alias for inserting rows into `payments`.
pub type NewPaymentEntity = InsertPaymentEntity;
