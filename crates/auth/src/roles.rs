use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Role label used for RBAC.
///
/// Roles are opaque strings drawn from an open vocabulary; the well-known
/// labels used by the storefront routes are provided as constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role::from_static("admin");
    pub const CLIENT: Role = Role::from_static("client");
    pub const SERVICE_ACCOUNT: Role = Role::from_static("service_account");
    pub const BODEGA: Role = Role::from_static("bodega");
    pub const MANTENEDOR: Role = Role::from_static("mantenedor");
    pub const JEFE_TIENDA: Role = Role::from_static("jefe_tienda");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of role labels.
///
/// Always a collection on the wire (a JSON array), even for a single role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    /// True when at least one role is present in both sets.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|r| large.contains(r))
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(Role::as_str).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.labels().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_owned_roles_compare_equal() {
        assert_eq!(Role::ADMIN, Role::new("admin".to_string()));
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = RoleSet::from([Role::ADMIN, Role::MANTENEDOR]);
        let b = RoleSet::from([Role::CLIENT, Role::MANTENEDOR]);
        let c = RoleSet::from([Role::BODEGA]);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!RoleSet::new().intersects(&a));
    }

    #[test]
    fn serializes_as_sorted_array() {
        let set = RoleSet::from([Role::JEFE_TIENDA, Role::ADMIN]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["admin","jefe_tienda"]"#);
    }

    #[test]
    fn scalar_role_is_not_a_role_set() {
        assert!(serde_json::from_str::<RoleSet>(r#""admin""#).is_err());
    }
}
