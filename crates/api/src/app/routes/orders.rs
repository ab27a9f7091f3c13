use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use ferremas_auth::Role;
use ferremas_core::{OrderConfirmation, OrderRequest};

use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// `POST /orders`: price an order against live stock and acknowledge it.
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> Result<(StatusCode, Json<OrderConfirmation>), ApiError> {
    request.validate()?;

    if !principal.has_role(&Role::ADMIN) && principal.username() != request.client_username {
        tracing::info!(
            username = principal.username(),
            client = %request.client_username,
            "order rejected: client ordering on behalf of another account"
        );
        return Err(ApiError::Forbidden(
            "clients may only place orders for their own account".to_string(),
        ));
    }

    services
        .catalog
        .get_branch(request.branch_id)
        .await
        .map_err(ApiError::lookup(format!("branch {}", request.branch_id)))?;

    let mut products = HashMap::new();
    for (product_id, _) in request.quantities()? {
        let product = services
            .catalog
            .get_product(product_id)
            .await
            .map_err(ApiError::lookup(format!("product {product_id}")))?;
        products.insert(product_id, product);
    }

    let confirmation = OrderConfirmation::price(&request, &products, Uuid::now_v7(), Utc::now())?;
    tracing::info!(
        order_id = %confirmation.order_id,
        client = %confirmation.client_username,
        branch_id = %confirmation.branch_id,
        total = confirmation.total,
        "order accepted"
    );

    Ok((StatusCode::CREATED, Json(confirmation)))
}
