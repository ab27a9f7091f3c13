//! Role requirements for the guarded route groups.

use ferremas_auth::{AccessPolicy, PolicyError, Role};

#[derive(Debug, Clone)]
pub struct Policies {
    /// Create products, flag promotions and new arrivals.
    pub catalog_write: AccessPolicy,
    /// Seller listings (whole staff or per branch).
    pub seller_directory: AccessPolicy,
    /// A single seller's profile.
    pub seller_profile: AccessPolicy,
    /// Orders and contact requests.
    pub storefront: AccessPolicy,
    pub payments: AccessPolicy,
}

impl Policies {
    pub fn standard() -> Result<Self, PolicyError> {
        Ok(Self {
            catalog_write: AccessPolicy::any_of([Role::ADMIN, Role::MANTENEDOR])?,
            seller_directory: AccessPolicy::any_of([Role::ADMIN, Role::JEFE_TIENDA])?,
            seller_profile: AccessPolicy::any_of([
                Role::ADMIN,
                Role::JEFE_TIENDA,
                Role::BODEGA,
                Role::CLIENT,
            ])?,
            storefront: AccessPolicy::any_of([Role::CLIENT, Role::ADMIN])?,
            payments: AccessPolicy::any_of([Role::SERVICE_ACCOUNT, Role::ADMIN, Role::CLIENT])?,
        })
    }
}
