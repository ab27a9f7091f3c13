//! Credential store provisioning at startup.

use std::path::Path;

use anyhow::Context;

use ferremas_auth::{InMemoryCredentialStore, PasswordVerifier, Role, RoleSet, StoredPrincipal};

/// Built-in accounts for local development, one per storefront role.
const DEVELOPMENT_USERS: &[(&str, &str, &[&str])] = &[
    ("javier_thompson", "dev-admin-password", &["admin"]),
    ("ignacio_tapia", "dev-client-password", &["client"]),
    ("stripe_sa", "dev-service-password", &["service_account"]),
    ("bodega_user", "bodega_password", &["bodega"]),
    ("mantenedor_user", "mantenedor_password", &["mantenedor"]),
    ("jefe_tienda_user", "jefetienda_password", &["jefe_tienda"]),
];

/// Load the registry file when configured, else hash the development users.
///
/// Hashing runs on the blocking pool.
pub async fn provision_store(
    users_file: Option<&Path>,
    passwords: &PasswordVerifier,
) -> anyhow::Result<InMemoryCredentialStore> {
    match users_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read credential registry {}", path.display()))?;
            let store = InMemoryCredentialStore::from_registry_json(&raw)
                .with_context(|| format!("invalid credential registry {}", path.display()))?;
            tracing::info!(path = %path.display(), users = store.len(), "credential registry loaded");
            Ok(store)
        }
        None => {
            tracing::warn!(
                "FERREMAS_USERS_FILE not set; provisioning built-in development users"
            );
            let passwords = passwords.clone();
            tokio::task::spawn_blocking(move || development_store(&passwords)).await?
        }
    }
}

pub fn development_store(passwords: &PasswordVerifier) -> anyhow::Result<InMemoryCredentialStore> {
    let mut principals = Vec::with_capacity(DEVELOPMENT_USERS.len());
    for (username, password, roles) in DEVELOPMENT_USERS {
        let hash = passwords
            .hash(password)
            .with_context(|| format!("failed to hash password for {username}"))?;
        let roles: RoleSet = roles.iter().map(|r| Role::new(*r)).collect();
        principals.push(StoredPrincipal::new(*username, roles, hash));
    }
    Ok(InMemoryCredentialStore::from_principals(principals)?)
}
