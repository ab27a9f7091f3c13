//! Infrastructure layer: clients for the collaborators behind the API.
//!
//! - `upstream`: authenticated HTTP client for the Ferremas data API
//! - `catalog`: typed product/branch/seller access over that client
//! - `payments`: payment gateway contract + simulated gateway
//! - `currency`: exchange-rate contract + static rate table

pub mod catalog;
pub mod currency;
pub mod payments;
pub mod upstream;

pub use catalog::{CatalogProvider, HttpCatalog};
pub use currency::{RateError, RateProvider, StaticRateProvider};
pub use payments::{PaymentError, PaymentGateway, SimulatedGateway};
pub use upstream::{Entity, UpstreamClient, UpstreamConfig, UpstreamError};
