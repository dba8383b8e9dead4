use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::payments::PaymentEntity,
    value_objects::enums::payment_statuses::PaymentStatus,
};

#[derive(Debug, Clone, Deserialize)]
pub struct PurchasePremiumModel {
    pub user_id: Uuid,
    #[serde(default)]
    pub plan: Option<String>,
    pub payment_method: String,
    #[serde(default)]
    pub payment_data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurchaseResultDto {
    pub success: bool,
    pub message: String,
    pub payment_id: Uuid,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub payment_data: serde_json::Value,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentEntity> for PaymentDto {
    fn from(value: PaymentEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            amount: minor_to_amount(value.amount_minor.into()),
            currency: value.currency,
            payment_method: value.payment_method,
            payment_data: value.payment_data,
            status: PaymentStatus::from_str(&value.status),
            created_at: value.created_at,
        }
    }
}

pub fn minor_to_amount(amount_minor: i64) -> f64 {
    amount_minor as f64 / 100.0
}
