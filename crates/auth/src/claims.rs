use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RoleSet, TokenError};

/// Session token claims (transport-agnostic).
///
/// Timestamps have whole-second precision, as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's username.
    pub subject: String,

    /// Roles granted at issuance.
    pub roles: RoleSet,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

/// Validate the time window of already signature-checked claims.
///
/// A window where `expires_at <= issued_at` is malformed (`Invalid`); a token
/// is `Expired` from its expiry instant onwards.
pub fn validate_claims(
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), TokenError> {
    if expires_at <= issued_at {
        return Err(TokenError::Invalid);
    }
    if now >= expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}
