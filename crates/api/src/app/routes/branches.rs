use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    routing::get,
};

use ferremas_core::{Branch, BranchId, Seller};

use crate::app::errors::ApiError;
use crate::app::extract::ApiPath;
use crate::app::services::AppServices;

pub fn public_router() -> Router {
    Router::new()
        .route("/branches", get(list_branches))
        .route("/branches/:id", get(get_branch))
}

pub async fn list_branches(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Branch>>, ApiError> {
    Ok(Json(services.catalog.list_branches().await?))
}

pub async fn get_branch(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Branch>, ApiError> {
    let id: BranchId = id.parse()?;
    let branch = services
        .catalog
        .get_branch(id)
        .await
        .map_err(ApiError::lookup(format!("branch {id}")))?;
    Ok(Json(branch))
}

/// Staff listing for one branch; lives under `/branches` but is guarded
/// with the seller directory routes.
pub async fn branch_sellers(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Vec<Seller>>, ApiError> {
    let id: BranchId = id.parse()?;
    let sellers = services
        .catalog
        .sellers_by_branch(id)
        .await
        .map_err(ApiError::lookup(format!("branch {id}")))?;
    Ok(Json(sellers))
}
