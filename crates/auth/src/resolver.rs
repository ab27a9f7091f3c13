//! Resolves a presented token to the calling principal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{CredentialStore, Principal, TokenCodec, TokenError};

/// The caller could not be authenticated.
///
/// The variant is kept for logging; callers should present one uniform message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Unauthenticated {
    #[error("no bearer token presented")]
    MissingToken,

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("token subject is no longer provisioned")]
    Deprovisioned,
}

impl Unauthenticated {
    pub fn reason(&self) -> &'static str {
        match self {
            Unauthenticated::MissingToken => "missing_token",
            Unauthenticated::InvalidToken => "invalid_token",
            Unauthenticated::ExpiredToken => "expired_token",
            Unauthenticated::Deprovisioned => "deprovisioned",
        }
    }
}

impl From<TokenError> for Unauthenticated {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Expired => Unauthenticated::ExpiredToken,
            TokenError::Invalid | TokenError::Encode(_) => Unauthenticated::InvalidToken,
        }
    }
}

pub struct PrincipalResolver {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
}

impl PrincipalResolver {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Decode `token` as of `now` and confirm its subject is still provisioned.
    ///
    /// The returned roles are the ones embedded in the token, not the store's
    /// current grants.
    pub fn resolve(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, Unauthenticated> {
        let claims = self.codec.decode(token, now)?;

        if self.store.lookup(&claims.subject).is_none() {
            return Err(Unauthenticated::Deprovisioned);
        }

        Ok(Principal::new(claims.subject, claims.roles))
    }
}

impl core::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrincipalResolver")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, ADMIN_PASSWORD};
    use crate::{Role, RoleSet, TokenTtl};
    use chrono::Duration;

    #[tokio::test]
    async fn resolves_issued_token() {
        let fx = fixture();
        let issued = fx.issuer.login("javier_thompson", ADMIN_PASSWORD).await.unwrap();

        let principal = fx.resolver.resolve(&issued.access_token, Utc::now()).unwrap();
        assert_eq!(principal.username, "javier_thompson");
        assert!(principal.roles.contains(&Role::ADMIN));
    }

    #[tokio::test]
    async fn deprovisioned_subject_is_unauthenticated() {
        let fx = fixture();
        let issued = fx.issuer.login("javier_thompson", ADMIN_PASSWORD).await.unwrap();

        let reduced: Arc<dyn CredentialStore> = Arc::new(fx.store.without("javier_thompson"));
        let resolver = PrincipalResolver::new(reduced, fx.codec.clone());

        assert_eq!(
            resolver.resolve(&issued.access_token, Utc::now()),
            Err(Unauthenticated::Deprovisioned)
        );
    }

    #[test]
    fn roles_come_from_the_token_not_the_store() {
        let fx = fixture();
        let now = Utc::now();
        // Store grants `client`; the token carries `client` + `bodega`.
        let roles = RoleSet::from([Role::CLIENT, Role::BODEGA]);
        let token = fx
            .codec
            .encode("ignacio_tapia", &roles, now, TokenTtl::from_minutes(5).unwrap())
            .unwrap();

        let principal = fx.resolver.resolve(&token, now).unwrap();
        assert_eq!(principal.roles, roles);
    }

    #[test]
    fn expired_and_invalid_tokens_are_unauthenticated() {
        let fx = fixture();
        let now = Utc::now();
        let token = fx
            .codec
            .encode(
                "javier_thompson",
                &RoleSet::from([Role::ADMIN]),
                now,
                TokenTtl::from_minutes(1).unwrap(),
            )
            .unwrap();

        assert_eq!(
            fx.resolver.resolve(&token, now + Duration::minutes(2)),
            Err(Unauthenticated::ExpiredToken)
        );
        assert_eq!(
            fx.resolver.resolve("not-a-token", now),
            Err(Unauthenticated::InvalidToken)
        );
    }
}
