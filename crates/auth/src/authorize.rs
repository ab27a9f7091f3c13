use thiserror::Error;

use crate::{Principal, Role, RoleSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("an access policy must require at least one role")]
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: requires one of [{required}]")]
    Forbidden { required: RoleSet },
}

/// Static per-route requirement: any one of a non-empty set of roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    required: RoleSet,
}

impl AccessPolicy {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Result<Self, PolicyError> {
        let required: RoleSet = roles.into_iter().collect();
        if required.is_empty() {
            return Err(PolicyError::Empty);
        }
        Ok(Self { required })
    }

    pub fn required(&self) -> &RoleSet {
        &self.required
    }

    pub fn is_satisfied_by(&self, roles: &RoleSet) -> bool {
        self.required.intersects(roles)
    }
}

/// Authorize a resolved principal against a policy.
///
/// - No IO
/// - No panics
/// - Allowed iff the principal holds at least one required role
pub fn authorize(policy: &AccessPolicy, principal: &Principal) -> Result<(), AuthzError> {
    if policy.is_satisfied_by(&principal.roles) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            required: policy.required().clone(),
        })
    }
}
