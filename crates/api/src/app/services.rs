use std::sync::Arc;

use ferremas_infra::{CatalogProvider, PaymentGateway, RateProvider};

/// Collaborators the handlers call into. Shared read-only across requests.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<dyn CatalogProvider>,
    pub payments: Arc<dyn PaymentGateway>,
    pub rates: Arc<dyn RateProvider>,
}
