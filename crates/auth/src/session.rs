//! Login: credential verification followed by token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    CredentialStore, HashedPassword, PasswordError, PasswordVerifier, TokenCodec, TokenError,
    TokenTtl,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Unknown username or wrong password; the two are indistinguishable.
    #[error("incorrect username or password")]
    Denied,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("credential verification failed: {0}")]
    Internal(String),
}

/// A freshly minted session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies credentials against the store and mints session tokens.
pub struct SessionIssuer {
    store: Arc<dyn CredentialStore>,
    passwords: PasswordVerifier,
    codec: Arc<TokenCodec>,
    ttl: TokenTtl,
    decoy: HashedPassword,
}

impl SessionIssuer {
    /// Build an issuer. Computes one hash up front (the decoy compared against
    /// when the username is unknown), so this blocks briefly. The decoy takes
    /// its cost parameters from the store's reference hash when there is one.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        passwords: PasswordVerifier,
        codec: Arc<TokenCodec>,
        ttl: TokenTtl,
    ) -> Result<Self, PasswordError> {
        let decoy = match store.reference_hash() {
            Some(reference) => passwords.hash_like("decoy-credential", &reference)?,
            None => passwords.hash("decoy-credential")?,
        };
        Ok(Self {
            store,
            passwords,
            codec,
            ttl,
            decoy,
        })
    }

    pub fn ttl(&self) -> TokenTtl {
        self.ttl
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, LoginError> {
        self.login_at(username, password, Utc::now()).await
    }

    /// Login as of `now`. Hash verification runs on the blocking pool.
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, LoginError> {
        let principal = self.store.lookup(username);

        let hash = principal
            .as_ref()
            .map(|p| p.password_hash().clone())
            .unwrap_or_else(|| self.decoy.clone());
        let passwords = self.passwords.clone();
        let plaintext = password.to_owned();

        let verified = tokio::task::spawn_blocking(move || passwords.verify(&plaintext, &hash))
            .await
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        let principal = match (principal, verified) {
            (Some(principal), true) => principal,
            (None, _) => {
                tracing::info!(username, reason = "unknown_principal", "login denied");
                return Err(LoginError::Denied);
            }
            (Some(_), false) => {
                tracing::info!(username, reason = "credential_mismatch", "login denied");
                return Err(LoginError::Denied);
            }
        };

        let access_token = self
            .codec
            .encode(principal.username(), principal.roles(), now, self.ttl)?;
        let expires_at = now + self.ttl.as_duration();

        tracing::info!(username, roles = %principal.roles(), %expires_at, "session issued");

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }
}

impl core::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("codec", &self.codec)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
