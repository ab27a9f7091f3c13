//! Per-request access evaluation.
//!
//! Terminal states, in precedence order:
//! no token → invalid/expired token → deprovisioned subject (all
//! `Unauthenticated`) → no intersecting role (`Forbidden`) → allowed.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{AccessPolicy, AuthzError, Principal, PrincipalResolver, Unauthenticated, authorize};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] Unauthenticated),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),
}

#[derive(Debug)]
pub struct AccessGuard {
    resolver: PrincipalResolver,
}

impl AccessGuard {
    pub fn new(resolver: PrincipalResolver) -> Self {
        Self { resolver }
    }

    /// Identify the caller without a role requirement.
    pub fn authenticate(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Principal, Unauthenticated> {
        let token = token.ok_or(Unauthenticated::MissingToken)?;
        self.resolver.resolve(token, now)
    }

    /// Run the full evaluation for a route protected by `policy`.
    pub fn evaluate(
        &self,
        token: Option<&str>,
        policy: &AccessPolicy,
        now: DateTime<Utc>,
    ) -> Result<Principal, AccessDenied> {
        let principal = self.authenticate(token, now)?;
        authorize(policy, &principal)?;
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, ADMIN_PASSWORD, CLIENT_PASSWORD};
    use crate::{Role, RoleSet, TokenTtl};

    fn catalog_write() -> AccessPolicy {
        AccessPolicy::any_of([Role::ADMIN, Role::MANTENEDOR]).unwrap()
    }

    #[tokio::test]
    async fn admin_allowed_client_forbidden_anonymous_unauthenticated() {
        let fx = fixture();
        let now = Utc::now();

        let admin = fx.issuer.login_at("javier_thompson", ADMIN_PASSWORD, now).await.unwrap();
        let client = fx.issuer.login_at("ignacio_tapia", CLIENT_PASSWORD, now).await.unwrap();

        let allowed = fx
            .guard
            .evaluate(Some(admin.access_token.as_str()), &catalog_write(), now)
            .unwrap();
        assert_eq!(allowed.username, "javier_thompson");

        assert!(matches!(
            fx.guard.evaluate(Some(client.access_token.as_str()), &catalog_write(), now),
            Err(AccessDenied::Forbidden(_))
        ));

        assert_eq!(
            fx.guard.evaluate(None, &catalog_write(), now),
            Err(AccessDenied::Unauthenticated(Unauthenticated::MissingToken))
        );
    }

    #[test]
    fn unauthenticated_takes_precedence_over_forbidden() {
        let fx = fixture();
        let now = Utc::now();
        // Would be forbidden (client on a catalog-write route), but it is expired.
        let token = fx
            .codec
            .encode(
                "ignacio_tapia",
                &RoleSet::from([Role::CLIENT]),
                now - chrono::Duration::hours(2),
                TokenTtl::from_minutes(30).unwrap(),
            )
            .unwrap();

        assert_eq!(
            fx.guard.evaluate(Some(token.as_str()), &catalog_write(), now),
            Err(AccessDenied::Unauthenticated(Unauthenticated::ExpiredToken))
        );
    }

    #[test]
    fn expired_admin_token_is_never_allowed() {
        let fx = fixture();
        let issued = Utc::now();
        let token = fx
            .codec
            .encode(
                "javier_thompson",
                &RoleSet::from([Role::ADMIN]),
                issued,
                TokenTtl::from_seconds(60).unwrap(),
            )
            .unwrap();

        let later = issued + chrono::Duration::seconds(61);
        assert!(matches!(
            fx.guard.evaluate(Some(token.as_str()), &catalog_write(), later),
            Err(AccessDenied::Unauthenticated(_))
        ));
    }
}
