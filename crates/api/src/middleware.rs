//! Access middleware: bearer-token extraction and per-route role guards.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use ferremas_auth::{
    AccessDenied, AccessGuard, AccessPolicy, CredentialStore, PasswordError, PasswordVerifier,
    PrincipalResolver, SessionIssuer, TokenCodec, TokenTtl, Unauthenticated,
};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Shared authentication services: login on one side, request checks on the other.
#[derive(Clone)]
pub struct AuthState {
    pub issuer: Arc<SessionIssuer>,
    pub guard: Arc<AccessGuard>,
}

impl AuthState {
    /// Wire issuer and guard over one store and codec.
    ///
    /// Computes the issuer's decoy hash, so call it off the async executor
    /// when the verifier uses production cost parameters.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        passwords: PasswordVerifier,
        codec: Arc<TokenCodec>,
        ttl: TokenTtl,
    ) -> Result<Self, PasswordError> {
        let issuer = SessionIssuer::new(store.clone(), passwords, codec.clone(), ttl)?;
        let guard = AccessGuard::new(PrincipalResolver::new(store, codec));
        Ok(Self {
            issuer: Arc::new(issuer),
            guard: Arc::new(guard),
        })
    }
}

/// State for one guarded route group.
#[derive(Clone)]
pub struct GuardState {
    guard: Arc<AccessGuard>,
    policy: Arc<AccessPolicy>,
}

impl GuardState {
    pub fn new(guard: Arc<AccessGuard>, policy: AccessPolicy) -> Self {
        Self {
            guard,
            policy: Arc::new(policy),
        }
    }
}

/// Admit the request only if its bearer token names a principal holding at
/// least one of the group's roles.
pub async fn require_roles(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = state
        .guard
        .evaluate(extract_bearer(req.headers()), &state.policy, Utc::now());

    match outcome {
        Ok(principal) => {
            req.extensions_mut().insert(PrincipalContext::new(principal));
            next.run(req).await
        }
        Err(AccessDenied::Unauthenticated(reason)) => reject_unauthenticated(&req, reason),
        Err(AccessDenied::Forbidden(err)) => {
            tracing::info!(
                path = %req.uri().path(),
                required = %state.policy.required(),
                "request forbidden"
            );
            errors::json_error(
                axum::http::StatusCode::FORBIDDEN,
                "forbidden",
                err.to_string(),
            )
        }
    }
}

/// Admit any caller with a valid token, regardless of roles.
pub async fn require_principal(
    State(guard): State<Arc<AccessGuard>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = guard.authenticate(extract_bearer(req.headers()), Utc::now());

    match outcome {
        Ok(principal) => {
            req.extensions_mut().insert(PrincipalContext::new(principal));
            next.run(req).await
        }
        Err(reason) => reject_unauthenticated(&req, reason),
    }
}

fn reject_unauthenticated(
    req: &axum::http::Request<axum::body::Body>,
    reason: Unauthenticated,
) -> Response {
    tracing::debug!(path = %req.uri().path(), reason = reason.reason(), "request unauthenticated");
    errors::unauthenticated("could not validate credentials")
}

/// `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer   abc ")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
        assert_eq!(extract_bearer(&headers("Bearer")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
