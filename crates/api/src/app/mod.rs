//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: collaborators behind the handlers (catalog, payments, rates)
//! - `provisioning.rs`: credential store loading at startup
//! - `routes/`: HTTP routes + handlers (one file per area) and their access policies
//! - `dto.rs`: request/response DTOs that only exist at the HTTP edge
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use ferremas_auth::{CredentialStore, PasswordVerifier, TokenCodec};
use ferremas_infra::{HttpCatalog, SimulatedGateway, StaticRateProvider, UpstreamClient};

use crate::config::Settings;
use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod provisioning;
pub mod routes;
pub mod services;

use routes::policies::Policies;
use services::AppServices;

/// Build the full HTTP router from validated settings (entrypoint used by `main.rs`).
pub async fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let codec = Arc::new(
        TokenCodec::new(settings.secret_key(), settings.algorithm)
            .context("invalid token signing configuration")?,
    );
    let passwords = PasswordVerifier::default();

    let store: Arc<dyn CredentialStore> = Arc::new(
        provisioning::provision_store(settings.users_file(), &passwords).await?,
    );

    let ttl = settings.token_ttl;
    let auth = tokio::task::spawn_blocking(move || AuthState::new(store, passwords, codec, ttl))
        .await?
        .context("failed to initialise session issuer")?;

    let upstream = UpstreamClient::new(settings.upstream.clone())
        .context("invalid upstream configuration")?;
    tracing::info!(upstream = upstream.base_url(), "upstream data API configured");

    let services = AppServices {
        catalog: Arc::new(HttpCatalog::new(upstream)),
        payments: Arc::new(SimulatedGateway::new()),
        rates: Arc::new(StaticRateProvider::default()),
    };

    build_router(services, auth)
}

/// Assemble the router around already-built services.
pub fn build_router(services: AppServices, auth: AuthState) -> anyhow::Result<Router> {
    let policies = Policies::standard().context("invalid route policy")?;

    Ok(routes::router(&auth, policies).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(Arc::new(services)))
            .layer(Extension(auth)),
    ))
}
