//! Payment gateway contract and the simulated gateway used in development.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use ferremas_core::{DomainError, PaymentReceipt, PaymentRequest, PaymentStatus};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaymentError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Deterministic in-process gateway.
///
/// Payment methods must look like `pm_*`; any method containing
/// `chargeDeclined` is declined, mirroring the card-processor test tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        request.validate()?;

        let method = request.payment_method_id.trim();
        if !method.starts_with("pm_") {
            return Err(PaymentError::Declined(format!(
                "unknown payment method '{method}'"
            )));
        }
        if method.contains("chargeDeclined") {
            return Err(PaymentError::Declined("card was declined".to_string()));
        }

        let receipt = PaymentReceipt {
            id: format!("pi_sim_{}", Uuid::now_v7().simple()),
            status: PaymentStatus::Succeeded,
            amount: request.amount,
            currency: request.currency.clone(),
            payment_method_id: method.to_string(),
        };
        tracing::info!(payment_id = %receipt.id, amount = receipt.amount, currency = %receipt.currency, "payment captured");
        Ok(receipt)
    }
}
