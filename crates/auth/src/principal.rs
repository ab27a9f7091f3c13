use serde::Serialize;

use crate::{HashedPassword, RoleSet};

/// A provisioned identity as held by the credential store.
///
/// Carries the password hash, so it never leaves the auth boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPrincipal {
    username: String,
    roles: RoleSet,
    password_hash: HashedPassword,
}

impl StoredPrincipal {
    pub fn new(username: impl Into<String>, roles: RoleSet, password_hash: HashedPassword) -> Self {
        Self {
            username: username.into(),
            roles,
            password_hash,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}

/// The authenticated caller of a request.
///
/// Roles are the ones embedded in the presented token at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub username: String,
    pub roles: RoleSet,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }
}
