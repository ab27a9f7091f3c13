use axum::{Json, extract::Extension, http::StatusCode};
use serde_json::{Value, json};

use crate::app::dto::WhoAmI;
use crate::context::PrincipalContext;

pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "ferremas-api",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Ferremas integration API",
    }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<WhoAmI> {
    Json(WhoAmI {
        username: principal.username().to_string(),
        roles: principal.roles().clone(),
    })
}
