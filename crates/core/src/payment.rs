//! Payment requests and receipts exchanged with the payment gateway.

use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, DomainError, DomainResult};

/// Charge request (card-style: an opaque payment-method reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub currency: CurrencyCode,
    pub payment_method_id: String,
}

impl PaymentRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(DomainError::validation("amount must be a positive number"));
        }
        if self.payment_method_id.trim().is_empty() {
            return Err(DomainError::validation("payment_method_id must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub payment_method_id: String,
}
