//! Password hashing and verification (Argon2id, PHC string format).
//!
//! Hashing is deliberately slow. Callers on an async runtime should run
//! `hash`/`verify` on the blocking pool.

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("malformed password hash: {0}")]
    Malformed(String),

    #[error("invalid hashing parameters: {0}")]
    Params(String),
}

/// Encoded password hash (PHC string, salt and parameters included).
///
/// Opaque: never serialized outward and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Accept an encoded hash, checking that it parses as a PHC string.
    pub fn from_phc(encoded: impl Into<String>) -> Result<Self, PasswordError> {
        let encoded = encoded.into();
        argon2::PasswordHash::new(&encoded).map_err(|e| PasswordError::Malformed(e.to_string()))?;
        Ok(Self(encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HashedPassword {
    type Error = PasswordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_phc(value)
    }
}

impl core::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Hashes and verifies credentials.
#[derive(Clone, Default)]
pub struct PasswordVerifier {
    argon2: Argon2<'static>,
}

impl PasswordVerifier {
    /// Argon2id with explicit cost parameters (memory in KiB, iterations, lanes).
    pub fn with_cost(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash with a fresh random salt; equal inputs yield different encodings.
    pub fn hash(&self, plaintext: &str) -> Result<HashedPassword, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(HashedPassword(encoded.to_string()))
    }

    /// Hash with the algorithm, version and cost parameters recorded in
    /// `reference` instead of this verifier's own.
    pub fn hash_like(
        &self,
        plaintext: &str,
        reference: &HashedPassword,
    ) -> Result<HashedPassword, PasswordError> {
        let parsed = argon2::PasswordHash::new(reference.as_str())
            .map_err(|e| PasswordError::Malformed(e.to_string()))?;
        let algorithm =
            Algorithm::try_from(parsed.algorithm).map_err(|e| PasswordError::Params(e.to_string()))?;
        let version = match parsed.version {
            Some(v) => Version::try_from(v).map_err(|e| PasswordError::Params(e.to_string()))?,
            None => Version::default(),
        };
        let params = Params::try_from(&parsed).map_err(|e| PasswordError::Params(e.to_string()))?;

        Self {
            argon2: Argon2::new(algorithm, version, params),
        }
        .hash(plaintext)
    }

    /// Check a plaintext against a stored hash.
    ///
    /// The cost parameters recorded in the hash are used, not this verifier's.
    pub fn verify(&self, plaintext: &str, hashed: &HashedPassword) -> bool {
        let parsed = match argon2::PasswordHash::new(hashed.as_str()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl core::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PasswordVerifier").finish_non_exhaustive()
    }
}
