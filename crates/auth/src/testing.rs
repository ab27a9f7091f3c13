//! Shared fixtures for unit tests: cheap Argon2 parameters and a small
//! provisioned store.

use std::sync::Arc;

use crate::{
    AccessGuard, CredentialStore, InMemoryCredentialStore, PasswordVerifier, PrincipalResolver,
    Role, RoleSet, SessionIssuer, SigningAlgorithm, StoredPrincipal, TokenCodec, TokenTtl,
};

pub const ADMIN_PASSWORD: &str = "admin-correct-horse";
pub const CLIENT_PASSWORD: &str = "client-battery-staple";

pub fn fast_passwords() -> PasswordVerifier {
    PasswordVerifier::with_cost(8, 1, 1).unwrap()
}

pub struct Fixture {
    pub store: Arc<InMemoryCredentialStore>,
    pub codec: Arc<TokenCodec>,
    pub issuer: SessionIssuer,
    pub resolver: PrincipalResolver,
    pub guard: AccessGuard,
}

pub fn fixture() -> Fixture {
    let passwords = fast_passwords();
    let provision = |name: &str, password: &str, roles: RoleSet| {
        StoredPrincipal::new(name, roles, passwords.hash(password).unwrap())
    };

    let store = Arc::new(
        InMemoryCredentialStore::from_principals([
            provision("javier_thompson", ADMIN_PASSWORD, RoleSet::from([Role::ADMIN])),
            provision("ignacio_tapia", CLIENT_PASSWORD, RoleSet::from([Role::CLIENT])),
            provision(
                "multi_role",
                "multi_password",
                RoleSet::from([Role::BODEGA, Role::JEFE_TIENDA]),
            ),
        ])
        .unwrap(),
    );
    let codec = Arc::new(TokenCodec::new("unit-test-secret", SigningAlgorithm::Hs256).unwrap());
    let dyn_store: Arc<dyn CredentialStore> = store.clone();

    let issuer = SessionIssuer::new(
        dyn_store.clone(),
        passwords,
        codec.clone(),
        TokenTtl::from_minutes(30).unwrap(),
    )
    .unwrap();

    Fixture {
        store,
        codec: codec.clone(),
        issuer,
        resolver: PrincipalResolver::new(dyn_store.clone(), codec.clone()),
        guard: AccessGuard::new(PrincipalResolver::new(dyn_store, codec)),
    }
}
