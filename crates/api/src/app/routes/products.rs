use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::{get, post, put},
};

use ferremas_core::{Product, ProductId, ProductUpdate};

use crate::app::dto::{NewArrivalQuery, PromotionQuery};
use crate::app::errors::ApiError;
use crate::app::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app::services::AppServices;

pub fn public_router() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/promotions", get(list_promotions))
        .route("/products/newArrivals", get(list_new_arrivals))
        .route("/products/:id", get(get_product))
}

pub fn write_router() -> Router {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id/markPromotion", put(mark_promotion))
        .route("/products/:id/markNewArrival", put(mark_new_arrival))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(services.catalog.list_products().await?))
}

pub async fn list_promotions(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = services.catalog.list_products().await?;
    Ok(Json(products.into_iter().filter(|p| p.is_promotion).collect()))
}

pub async fn list_new_arrivals(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = services.catalog.list_products().await?;
    Ok(Json(products.into_iter().filter(|p| p.is_new_product).collect()))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = id.parse()?;
    let product = services
        .catalog
        .get_product(id)
        .await
        .map_err(ApiError::lookup(format!("product {id}")))?;
    Ok(Json(product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(product): ApiJson<Product>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    product.validate()?;
    let created = services.catalog.create_product(&product).await?;
    tracing::info!(product_id = %created.id, "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn mark_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
    ApiQuery(query): ApiQuery<PromotionQuery>,
) -> Result<Json<Product>, ApiError> {
    update_flags(&services, &id, ProductUpdate::promotion(query.is_promotion)).await
}

pub async fn mark_new_arrival(
    Extension(services): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<String>,
    ApiQuery(query): ApiQuery<NewArrivalQuery>,
) -> Result<Json<Product>, ApiError> {
    update_flags(&services, &id, ProductUpdate::new_arrival(query.is_new_arrival)).await
}

async fn update_flags(
    services: &AppServices,
    id: &str,
    update: ProductUpdate,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = id.parse()?;
    let product = services
        .catalog
        .update_product(id, &update)
        .await
        .map_err(ApiError::lookup(format!("product {id}")))?;
    tracing::info!(product_id = %id, ?update, "product flags updated");
    Ok(Json(product))
}
