//! `ferremas-core` — catalog and storefront records shared by the API and its
//! upstream adapters.
//!
//! This crate holds **pure data + validation** (no IO, no HTTP).

pub mod catalog;
pub mod contact;
pub mod currency;
pub mod error;
pub mod id;
pub mod order;
pub mod payment;

pub use catalog::{Branch, Product, ProductUpdate, Seller};
pub use contact::{ContactMessage, ContactReceipt};
pub use currency::{ConversionQuery, CurrencyCode, CurrencyConversion};
pub use error::{DomainError, DomainResult};
pub use id::{BranchId, ProductId, SellerId};
pub use order::{OrderConfirmation, OrderItem, OrderLine, OrderRequest};
pub use payment::{PaymentReceipt, PaymentRequest, PaymentStatus};
