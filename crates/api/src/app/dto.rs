//! Request/response shapes that exist only at the HTTP edge.

use serde::{Deserialize, Serialize};

use ferremas_auth::RoleSet;

/// `application/x-www-form-urlencoded` login body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub username: String,
    pub roles: RoleSet,
}

#[derive(Debug, Deserialize)]
pub struct PromotionQuery {
    pub is_promotion: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewArrivalQuery {
    pub is_new_arrival: bool,
}
