use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use ferremas_auth::AccessPolicy;

use crate::middleware::{self, AuthState, GuardState};

pub mod auth;
pub mod branches;
pub mod contact;
pub mod currency;
pub mod orders;
pub mod payments;
pub mod policies;
pub mod products;
pub mod sellers;
pub mod system;

use policies::Policies;

/// Full route table. Guarded groups run the access check before the handler;
/// groups sharing a path with public routes are merged per method.
pub fn router(auth: &AuthState, policies: Policies) -> Router {
    let guarded = |routes: Router, policy: AccessPolicy| {
        routes.route_layer(from_fn_with_state(
            GuardState::new(auth.guard.clone(), policy),
            middleware::require_roles,
        ))
    };

    let public = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/token", post(auth::issue_token))
        .route("/currency/convert", get(currency::convert))
        .merge(products::public_router())
        .merge(branches::public_router());

    let whoami = Router::new()
        .route("/whoami", get(system::whoami))
        .route_layer(from_fn_with_state(
            Arc::clone(&auth.guard),
            middleware::require_principal,
        ));

    let storefront = Router::new()
        .route("/orders", post(orders::place_order))
        .route("/contact", post(contact::send_contact));

    public
        .merge(whoami)
        .merge(guarded(products::write_router(), policies.catalog_write))
        .merge(guarded(sellers::directory_router(), policies.seller_directory))
        .merge(guarded(sellers::profile_router(), policies.seller_profile))
        .merge(guarded(storefront, policies.storefront))
        .merge(guarded(
            Router::new().route("/payments", post(payments::create_payment)),
            policies.payments,
        ))
}
