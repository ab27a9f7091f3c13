//! Catalog records as served by the upstream data API.
//!
//! These types are pass-through shapes: the upstream owns the data, this layer
//! only validates what it forwards on writes.

use serde::{Deserialize, Serialize};

use crate::{BranchId, DomainError, DomainResult, ProductId, SellerId};

/// A product in the hardware catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub is_promotion: bool,
    /// Marked as a new arrival. Older upstream payloads call this `is_new_arrival`.
    #[serde(default, alias = "is_new_arrival")]
    pub is_new_product: bool,
}

impl Product {
    /// Validate a product before it is forwarded to the upstream for creation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("product category must not be empty"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("product brand must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("product price must be a non-negative number"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("product stock must not be negative"));
        }
        Ok(())
    }
}

/// Partial update forwarded as the body of an upstream `PUT /products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_promotion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new_product: Option<bool>,
}

impl ProductUpdate {
    pub fn promotion(flag: bool) -> Self {
        Self {
            is_promotion: Some(flag),
            ..Self::default()
        }
    }

    pub fn new_arrival(flag: bool) -> Self {
        Self {
            is_new_product: Some(flag),
            ..Self::default()
        }
    }
}

/// A physical store branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A seller assigned to a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default)]
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    pub branch_id: BranchId,
}
