use serde_json::{Map, Value};

use crate::domain::value_objects::enums::payment_methods::PaymentMethod;

const CARD_NUMBER_DIGITS: usize = 16;
const MIN_CRYPTO_ADDRESS_LEN: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDecision {
    Approved,
    Declined(String),
}

impl PaymentDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentDecision::Approved)
    }
}

/// Stand-in processor: approves purely on the shape of the submitted payment data.
/// Nothing leaves the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedPaymentProcessor;

impl SimulatedPaymentProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, method: PaymentMethod, payment_data: &Value) -> PaymentDecision {
        match method {
            PaymentMethod::Card => {
                let digits = card_digits(payment_data);
                if digits.len() == CARD_NUMBER_DIGITS && digits.chars().all(|c| c.is_ascii_digit()) {
                    PaymentDecision::Approved
                } else {
                    PaymentDecision::Declined("Cartão inválido".to_string())
                }
            }
            PaymentMethod::Crypto => {
                let address = string_field(payment_data, "address").trim().to_string();
                if address.chars().count() >= MIN_CRYPTO_ADDRESS_LEN {
                    PaymentDecision::Approved
                } else {
                    PaymentDecision::Declined("Endereço de carteira inválido".to_string())
                }
            }
        }
    }
}

/// Copy of the payment data safe to persist: card number reduced to its last four
/// digits, CVV and expiry dropped. Crypto data is kept as submitted.
pub fn mask_payment_data(method: PaymentMethod, payment_data: &Value) -> Value {
    let Some(object) = payment_data.as_object() else {
        return Value::Object(Map::new());
    };

    match method {
        PaymentMethod::Card => {
            let mut masked = Map::new();
            let digits = card_digits(payment_data);
            let last_four: String = digits
                .chars()
                .skip(digits.chars().count().saturating_sub(4))
                .collect();
            masked.insert(
                "card_number".to_string(),
                Value::String(format!("**** **** **** {last_four}")),
            );
            if let Some(name) = object.get("name") {
                masked.insert("name".to_string(), name.clone());
            }
            Value::Object(masked)
        }
        PaymentMethod::Crypto => Value::Object(object.clone()),
    }
}

fn card_digits(payment_data: &Value) -> String {
    string_field(payment_data, "card_number")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn string_field<'a>(payment_data: &'a Value, key: &str) -> &'a str {
    payment_data.get(key).and_then(Value::as_str).unwrap_or("")
}
