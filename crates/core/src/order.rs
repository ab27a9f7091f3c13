//! Order placement: request validation and pricing against catalog snapshots.
//!
//! Orders are priced and acknowledged but never stored; the confirmation is
//! returned to the caller and logged.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BranchId, DomainError, DomainResult, Product, ProductId};

/// A single requested line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Incoming order (one or many products, picked up at one branch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub client_username: String,
    pub items: Vec<OrderItem>,
    pub branch_id: BranchId,
}

impl OrderRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.client_username.trim().is_empty() {
            return Err(DomainError::validation("client_username must not be empty"));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("an order needs at least one item"));
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity <= 0) {
            return Err(DomainError::validation(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }
        Ok(())
    }

    /// Total requested quantity per product (duplicate lines are summed).
    ///
    /// Fails with `Validation` when a summed quantity does not fit in an `i64`.
    pub fn quantities(&self) -> DomainResult<Vec<(ProductId, i64)>> {
        let mut totals: Vec<(ProductId, i64)> = Vec::new();
        for item in &self.items {
            match totals.iter_mut().find(|(id, _)| *id == item.product_id) {
                Some((_, qty)) => {
                    *qty = qty.checked_add(item.quantity).ok_or_else(|| {
                        DomainError::validation(format!(
                            "quantity for product {} is too large",
                            item.product_id
                        ))
                    })?;
                }
                None => totals.push((item.product_id, item.quantity)),
            }
        }
        Ok(totals)
    }
}

/// A priced line in the confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Acknowledgement returned for an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub client_username: String,
    pub branch_id: BranchId,
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Price a validated request against the current catalog records.
    ///
    /// Fails with `NotFound` for unknown products and `Conflict` when the
    /// requested quantity exceeds stock.
    pub fn price(
        request: &OrderRequest,
        catalog: &HashMap<ProductId, Product>,
        order_id: Uuid,
        placed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        request.validate()?;

        let mut lines = Vec::new();
        for (product_id, quantity) in request.quantities()? {
            let product = catalog
                .get(&product_id)
                .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;

            if product.stock < quantity {
                return Err(DomainError::conflict(format!(
                    "insufficient stock for product {product_id}: requested {quantity}, available {}",
                    product.stock
                )));
            }

            lines.push(OrderLine {
                product_id,
                name: product.name.clone(),
                quantity,
                unit_price: product.price,
                line_total: product.price * quantity as f64,
            });
        }

        let total: f64 = lines.iter().map(|l| l.line_total).sum();

        Ok(Self {
            order_id,
            client_username: request.client_username.clone(),
            branch_id: request.branch_id,
            lines,
            total,
            placed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: None,
            price,
            stock,
            category: "herramientas".to_string(),
            brand: "Ferremas".to_string(),
            is_promotion: false,
            is_new_product: false,
        }
    }

    fn catalog(products: Vec<Product>) -> HashMap<ProductId, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    fn request(items: Vec<(i64, i64)>) -> OrderRequest {
        OrderRequest {
            client_username: "ignacio_tapia".to_string(),
            items: items
                .into_iter()
                .map(|(id, quantity)| OrderItem {
                    product_id: ProductId::new(id),
                    quantity,
                })
                .collect(),
            branch_id: BranchId::new(1),
        }
    }

    #[test]
    fn empty_order_is_rejected() {
        let err = request(vec![]).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(request(vec![(1, 0)]).validate().is_err());
        assert!(request(vec![(1, -3)]).validate().is_err());
    }

    #[test]
    fn prices_multi_product_order() {
        let catalog = catalog(vec![product(1, 1000.0, 10), product(2, 250.5, 4)]);
        let req = request(vec![(1, 2), (2, 4)]);

        let confirmation =
            OrderConfirmation::price(&req, &catalog, Uuid::now_v7(), Utc::now()).unwrap();

        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.lines[0].line_total, 2000.0);
        assert_eq!(confirmation.lines[1].line_total, 1002.0);
        assert_eq!(confirmation.total, 3002.0);
        assert_eq!(confirmation.client_username, "ignacio_tapia");
    }

    #[test]
    fn duplicate_lines_are_summed_before_stock_check() {
        let catalog = catalog(vec![product(1, 10.0, 3)]);
        let req = request(vec![(1, 2), (1, 2)]);

        let err = OrderConfirmation::price(&req, &catalog, Uuid::now_v7(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn unknown_product_is_not_found() {
        let catalog = catalog(vec![product(1, 10.0, 3)]);
        let req = request(vec![(9, 1)]);

        let err = OrderConfirmation::price(&req, &catalog, Uuid::now_v7(), Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::not_found("product 9"));
    }

    #[test]
    fn overflowing_duplicate_lines_are_rejected() {
        let catalog = catalog(vec![product(1, 10.0, i64::MAX)]);
        let req = request(vec![(1, i64::MAX), (1, 1)]);
        assert!(req.validate().is_ok());

        assert_eq!(
            req.quantities().unwrap_err(),
            DomainError::validation("quantity for product 1 is too large")
        );
        let err = OrderConfirmation::price(&req, &catalog, Uuid::now_v7(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
