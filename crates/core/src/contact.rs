//! Contact requests sent from the storefront to a seller or the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, DomainResult, SellerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub client_name: String,
    pub client_email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
}

impl ContactMessage {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("client_name", &self.client_name),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }

        let email = self.client_email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(DomainError::validation("client_email is not a valid address")),
        }
    }
}

/// Acknowledgement for a received contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub status: String,
    pub seller_id: Option<SellerId>,
}

impl ContactReceipt {
    pub fn received(message: &ContactMessage) -> Self {
        Self {
            id: Uuid::now_v7(),
            status: "received".to_string(),
            seller_id: message.seller_id,
        }
    }
}
