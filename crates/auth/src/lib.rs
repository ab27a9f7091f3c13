//! `ferremas-auth` — authentication/authorization boundary.
//!
//! Credential store, password hashing, session tokens, principal resolution
//! and role-based access decisions. Decoupled from HTTP: the API crate runs
//! [`AccessGuard::evaluate`] in middleware before any handler.

pub mod authorize;
pub mod claims;
pub mod guard;
pub mod password;
pub mod principal;
pub mod resolver;
pub mod roles;
pub mod session;
pub mod store;
pub mod token;

#[cfg(test)]
mod testing;

pub use authorize::{AccessPolicy, AuthzError, PolicyError, authorize};
pub use claims::{TokenClaims, validate_claims};
pub use guard::{AccessDenied, AccessGuard};
pub use password::{HashedPassword, PasswordError, PasswordVerifier};
pub use principal::{Principal, StoredPrincipal};
pub use resolver::{PrincipalResolver, Unauthenticated};
pub use roles::{Role, RoleSet};
pub use session::{IssuedToken, LoginError, SessionIssuer};
pub use store::{CredentialStore, InMemoryCredentialStore, StoreError};
pub use token::{AuthConfigError, SigningAlgorithm, TokenCodec, TokenError, TokenTtl};
