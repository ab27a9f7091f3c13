//! Credential store: provisioned principals, read-only after construction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::{HashedPassword, RoleSet, StoredPrincipal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("principal '{0}' is provisioned more than once")]
    Duplicate(String),

    #[error("principal '{0}' has no roles")]
    NoRoles(String),

    #[error("invalid registry: {0}")]
    Registry(String),
}

/// Lookup of provisioned principals by username.
///
/// An unknown username is a normal `None`, not an error.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, username: &str) -> Option<StoredPrincipal>;

    /// A stored hash whose parameters represent the registry, if any.
    fn reference_hash(&self) -> Option<HashedPassword> {
        None
    }
}

impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    fn lookup(&self, username: &str) -> Option<StoredPrincipal> {
        (**self).lookup(username)
    }

    fn reference_hash(&self) -> Option<HashedPassword> {
        (**self).reference_hash()
    }
}

/// Immutable in-memory registry, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    principals: HashMap<String, StoredPrincipal>,
}

impl InMemoryCredentialStore {
    pub fn from_principals(
        principals: impl IntoIterator<Item = StoredPrincipal>,
    ) -> Result<Self, StoreError> {
        let mut map = HashMap::new();
        for principal in principals {
            let username = principal.username().to_string();
            if username.trim().is_empty() {
                return Err(StoreError::EmptyUsername);
            }
            if principal.roles().is_empty() {
                return Err(StoreError::NoRoles(username));
            }
            if map.contains_key(&username) {
                return Err(StoreError::Duplicate(username));
            }
            map.insert(username, principal);
        }
        Ok(Self { principals: map })
    }

    /// Parse a JSON registry of pre-hashed users:
    /// `{"users": [{"username": "...", "password_hash": "$argon2id$...", "roles": ["admin"]}]}`.
    pub fn from_registry_json(json: &str) -> Result<Self, StoreError> {
        let registry: Registry =
            serde_json::from_str(json).map_err(|e| StoreError::Registry(e.to_string()))?;
        Self::from_principals(
            registry
                .users
                .into_iter()
                .map(|u| StoredPrincipal::new(u.username, u.roles, u.password_hash)),
        )
    }

    /// A copy of this store with one principal removed.
    pub fn without(&self, username: &str) -> Self {
        let mut principals = self.principals.clone();
        principals.remove(username);
        Self { principals }
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.principals.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup(&self, username: &str) -> Option<StoredPrincipal> {
        self.principals.get(username).cloned()
    }

    /// Hash of the first principal by username.
    fn reference_hash(&self) -> Option<HashedPassword> {
        self.principals
            .iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, p)| p.password_hash().clone())
    }
}

#[derive(Debug, Deserialize)]
struct Registry {
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    username: String,
    password_hash: HashedPassword,
    roles: RoleSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::testing::fast_passwords;

    fn principal(name: &str, roles: RoleSet) -> StoredPrincipal {
        let hash = fast_passwords().hash("pw").unwrap();
        StoredPrincipal::new(name, roles, hash)
    }

    #[test]
    fn lookup_hits_and_misses() {
        let store = InMemoryCredentialStore::from_principals([
            principal("javier_thompson", RoleSet::from([Role::ADMIN])),
            principal("bodega_user", RoleSet::from([Role::BODEGA])),
        ])
        .unwrap();

        let found = store.lookup("bodega_user").unwrap();
        assert!(found.roles().contains(&Role::BODEGA));
        assert!(store.lookup("nobody").is_none());
        assert_eq!(store.usernames(), vec!["bodega_user", "javier_thompson"]);
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let err = InMemoryCredentialStore::from_principals([
            principal("a", RoleSet::from([Role::ADMIN])),
            principal("a", RoleSet::from([Role::CLIENT])),
        ])
        .unwrap_err();
        assert_eq!(err, StoreError::Duplicate("a".to_string()));
    }

    #[test]
    fn principal_without_roles_is_rejected() {
        let err = InMemoryCredentialStore::from_principals([principal("a", RoleSet::new())])
            .unwrap_err();
        assert_eq!(err, StoreError::NoRoles("a".to_string()));
    }

    #[test]
    fn without_leaves_original_untouched() {
        let store = InMemoryCredentialStore::from_principals([
            principal("a", RoleSet::from([Role::ADMIN])),
            principal("b", RoleSet::from([Role::CLIENT])),
        ])
        .unwrap();

        let reduced = store.without("a");
        assert!(reduced.lookup("a").is_none());
        assert!(store.lookup("a").is_some());
        assert_eq!(reduced.len(), 1);
    }

    #[test]
    fn loads_registry_json() {
        let hash = fast_passwords().hash("stripe").unwrap();
        let json = serde_json::json!({
            "users": [
                { "username": "stripe_sa", "password_hash": hash.as_str(), "roles": ["service_account"] }
            ]
        })
        .to_string();

        let store = InMemoryCredentialStore::from_registry_json(&json).unwrap();
        let sa = store.lookup("stripe_sa").unwrap();
        assert!(sa.roles().contains(&Role::SERVICE_ACCOUNT));
        assert!(fast_passwords().verify("stripe", sa.password_hash()));
    }

    #[test]
    fn registry_with_malformed_hash_or_scalar_roles_fails() {
        let bad_hash = r#"{"users":[{"username":"x","password_hash":"plain","roles":["admin"]}]}"#;
        assert!(matches!(
            InMemoryCredentialStore::from_registry_json(bad_hash),
            Err(StoreError::Registry(_))
        ));

        let hash = fast_passwords().hash("pw").unwrap();
        let scalar = serde_json::json!({
            "users": [{ "username": "x", "password_hash": hash.as_str(), "roles": "admin" }]
        })
        .to_string();
        assert!(InMemoryCredentialStore::from_registry_json(&scalar).is_err());
    }
}
