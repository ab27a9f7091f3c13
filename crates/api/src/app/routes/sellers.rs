use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    routing::get,
};

use ferremas_core::{Seller, SellerId};

use crate::app::errors::ApiError;
use crate::app::extract::ApiPath;
use crate::app::routes::branches;
use crate::app::services::AppServices;

pub fn directory_router() -> Router {
    Router::new()
        .route("/sellers", get(list_sellers))
        .route("/branches/:id/sellers", get(branches::branch_sellers))
}

pub fn profile_router() -> Router {
    Router::new().route("/sellers/:id", get(get_seller))
}

pub async fn list_sellers(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Seller>>, ApiError> {
    Ok(Json(services.catalog.list_sellers().await?))
}

pub async fn get_seller(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Seller>, ApiError> {
    let id: SellerId = id.parse()?;
    let seller = services
        .catalog
        .get_seller(id)
        .await
        .map_err(ApiError::lookup(format!("seller {id}")))?;
    Ok(Json(seller))
}
