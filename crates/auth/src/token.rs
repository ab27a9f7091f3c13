//! Signed session tokens (compact JWS, HMAC-SHA2).
//!
//! The codec checks, in order: structure + signature + algorithm, the expiry
//! window against the caller-supplied clock, then the presence of a subject.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{RoleSet, TokenClaims, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, wrongly signed, wrong algorithm, or missing subject.
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Startup configuration errors for the auth subsystem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("unsupported signing algorithm '{0}' (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("token time-to-live must be positive, got {0}")]
    NonPositiveTtl(i64),
}

/// HMAC algorithms usable with a shared signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl SigningAlgorithm {
    fn jwt(self) -> Algorithm {
        match self {
            SigningAlgorithm::Hs256 => Algorithm::HS256,
            SigningAlgorithm::Hs384 => Algorithm::HS384,
            SigningAlgorithm::Hs512 => Algorithm::HS512,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = AuthConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(SigningAlgorithm::Hs256),
            "HS384" => Ok(SigningAlgorithm::Hs384),
            "HS512" => Ok(SigningAlgorithm::Hs512),
            _ => Err(AuthConfigError::UnsupportedAlgorithm(s.trim().to_string())),
        }
    }
}

impl core::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SigningAlgorithm::Hs256 => "HS256",
            SigningAlgorithm::Hs384 => "HS384",
            SigningAlgorithm::Hs512 => "HS512",
        };
        f.write_str(name)
    }
}

/// Positive token lifetime with whole-second granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(Duration);

impl TokenTtl {
    pub fn from_seconds(seconds: i64) -> Result<Self, AuthConfigError> {
        if seconds <= 0 {
            return Err(AuthConfigError::NonPositiveTtl(seconds));
        }
        Duration::try_seconds(seconds)
            .map(Self)
            .ok_or(AuthConfigError::NonPositiveTtl(seconds))
    }

    pub fn from_minutes(minutes: i64) -> Result<Self, AuthConfigError> {
        if minutes <= 0 {
            return Err(AuthConfigError::NonPositiveTtl(minutes));
        }
        let seconds = minutes
            .checked_mul(60)
            .ok_or(AuthConfigError::NonPositiveTtl(minutes))?;
        Self::from_seconds(seconds)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

/// Wire form of the claims. `sub` is optional here so that a signed token
/// without a subject is reported as `Invalid` only after the expiry check.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default)]
    roles: RoleSet,
    #[serde(with = "chrono::serde::ts_seconds")]
    iat: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    exp: DateTime<Utc>,
}

/// Encodes and verifies session tokens with a process-wide secret.
pub struct TokenCodec {
    algorithm: SigningAlgorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>, algorithm: SigningAlgorithm) -> Result<Self, AuthConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }

        // Expiry is checked against an explicit clock in `decode`, not by the library.
        let mut validation = Validation::new(algorithm.jwt());
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Mint a token expiring at `issued_at + ttl`.
    pub fn encode(
        &self,
        subject: &str,
        roles: &RoleSet,
        issued_at: DateTime<Utc>,
        ttl: TokenTtl,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::Encode("subject must not be empty".to_string()));
        }
        let expires_at = issued_at
            .checked_add_signed(ttl.as_duration())
            .ok_or_else(|| TokenError::Encode("expiry is out of range".to_string()))?;

        let claims = WireClaims {
            sub: Some(subject.to_string()),
            roles: roles.clone(),
            iat: issued_at,
            exp: expires_at,
        };

        jsonwebtoken::encode(&Header::new(self.algorithm.jwt()), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify and decode a token as of `now`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected during verification");
                TokenError::Invalid
            })?;
        let claims = data.claims;

        validate_claims(claims.iat, claims.exp, now)?;

        let subject = match claims.sub {
            Some(sub) if !sub.is_empty() => sub,
            _ => return Err(TokenError::Invalid),
        };

        Ok(TokenClaims {
            subject,
            roles: claims.roles,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use proptest::prelude::*;

    const SECRET: &str = "test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, SigningAlgorithm::Hs256).unwrap()
    }

    fn ttl_minutes(m: i64) -> TokenTtl {
        TokenTtl::from_minutes(m).unwrap()
    }

    fn admin_roles() -> RoleSet {
        RoleSet::from([Role::ADMIN])
    }

    #[test]
    fn roundtrip_preserves_subject_and_roles() {
        let codec = codec();
        let now = Utc::now();
        let roles = RoleSet::from([Role::ADMIN, Role::MANTENEDOR]);

        let token = codec.encode("javier_thompson", &roles, now, ttl_minutes(30)).unwrap();
        let claims = codec.decode(&token, now).unwrap();

        assert_eq!(claims.subject, "javier_thompson");
        assert_eq!(claims.roles, roles);
        assert_eq!(claims.expires_at.timestamp() - claims.issued_at.timestamp(), 30 * 60);
    }

    #[test]
    fn token_is_url_safe() {
        let token = codec()
            .encode("ignacio_tapia", &admin_roles(), Utc::now(), ttl_minutes(5))
            .unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        );
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let codec = codec();
        let issued = Utc::now();
        let token = codec.encode("a", &admin_roles(), issued, ttl_minutes(1)).unwrap();

        assert_eq!(
            codec.decode(&token, issued + Duration::minutes(1)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.decode(&token, issued + Duration::hours(2)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let now = Utc::now();
        let token = codec().encode("a", &admin_roles(), now, ttl_minutes(5)).unwrap();
        let rotated = TokenCodec::new("rotated-secret", SigningAlgorithm::Hs256).unwrap();

        assert_eq!(rotated.decode(&token, now), Err(TokenError::Invalid));
    }

    #[test]
    fn algorithm_mismatch_is_invalid() {
        let now = Utc::now();
        let token = codec().encode("a", &admin_roles(), now, ttl_minutes(5)).unwrap();
        let hs384 = TokenCodec::new(SECRET, SigningAlgorithm::Hs384).unwrap();

        assert_eq!(hs384.decode(&token, now), Err(TokenError::Invalid));
    }

    #[test]
    fn unsigned_token_is_invalid() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.encode("a", &admin_roles(), now, ttl_minutes(5)).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{payload}.");
        assert_eq!(codec.decode(&forged, now), Err(TokenError::Invalid));
    }

    #[test]
    fn missing_subject_is_invalid_but_expiry_is_checked_first() {
        let codec = codec();
        let now = Utc::now();
        let claims = WireClaims {
            sub: None,
            roles: admin_roles(),
            iat: now,
            exp: now + Duration::minutes(5),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.decode(&token, now), Err(TokenError::Invalid));
        assert_eq!(
            codec.decode(&token, now + Duration::minutes(10)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn scalar_roles_claim_is_invalid() {
        let now = Utc::now();
        let claims = serde_json::json!({
            "sub": "ignacio_tapia",
            "roles": "admin",
            "iat": now.timestamp(),
            "exp": now.timestamp() + 300,
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().decode(&token, now), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let now = Utc::now();
        for raw in ["", "invalid.token.here", "a.b", "...."] {
            assert_eq!(codec().decode(raw, now), Err(TokenError::Invalid), "{raw:?}");
        }
    }

    #[test]
    fn configuration_is_validated() {
        assert_eq!(
            TokenCodec::new("", SigningAlgorithm::Hs256).unwrap_err(),
            AuthConfigError::EmptySecret
        );
        assert_eq!(TokenTtl::from_minutes(0), Err(AuthConfigError::NonPositiveTtl(0)));
        assert_eq!(TokenTtl::from_seconds(-5), Err(AuthConfigError::NonPositiveTtl(-5)));
        assert_eq!("hs512".parse::<SigningAlgorithm>(), Ok(SigningAlgorithm::Hs512));
        assert!(matches!(
            "RS256".parse::<SigningAlgorithm>(),
            Err(AuthConfigError::UnsupportedAlgorithm(_))
        ));
    }

    fn role_set() -> impl Strategy<Value = RoleSet> {
        prop::collection::vec("[a-z_]{1,12}", 0..5)
            .prop_map(|labels| labels.into_iter().map(Role::new).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: decode(encode(..)) before expiry returns the original subject and roles.
        #[test]
        fn encode_decode_roundtrip(
            subject in "[a-zA-Z0-9_.@-]{1,32}",
            roles in role_set(),
            ttl_secs in 1i64..86_400,
        ) {
            let codec = codec();
            let now = Utc::now();
            let token = codec
                .encode(&subject, &roles, now, TokenTtl::from_seconds(ttl_secs).unwrap())
                .unwrap();

            let claims = codec.decode(&token, now).unwrap();
            prop_assert_eq!(claims.subject, subject);
            prop_assert_eq!(claims.roles, roles);
        }

        /// Property: flipping any (ASCII-preserving) bit of a valid token invalidates it.
        #[test]
        fn flipping_a_bit_invalidates(
            subject in "[a-z_]{1,16}",
            roles in role_set(),
            index in any::<prop::sample::Index>(),
            bit in 0u8..7,
        ) {
            let codec = codec();
            let now = Utc::now();
            let token = codec.encode(&subject, &roles, now, TokenTtl::from_minutes(10).unwrap()).unwrap();

            let mut bytes = token.into_bytes();
            let i = index.index(bytes.len());
            bytes[i] ^= 1 << bit;
            let tampered = String::from_utf8(bytes).unwrap();

            prop_assert_eq!(codec.decode(&tampered, now), Err(TokenError::Invalid));
        }
    }
}
