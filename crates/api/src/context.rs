use ferremas_auth::{Principal, Role, RoleSet};

/// Principal context for a request (authenticated username + token roles).
///
/// Inserted into request extensions by the access middleware; handlers behind
/// a guard can rely on it being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn username(&self) -> &str {
        &self.principal.username
    }

    pub fn roles(&self) -> &RoleSet {
        &self.principal.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.principal.roles.contains(role)
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

impl From<Principal> for PrincipalContext {
    fn from(principal: Principal) -> Self {
        Self::new(principal)
    }
}
