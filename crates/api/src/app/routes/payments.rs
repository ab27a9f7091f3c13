use std::sync::Arc;

use axum::{Json, extract::Extension};

use ferremas_core::{PaymentReceipt, PaymentRequest};

use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn create_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(request): ApiJson<PaymentRequest>,
) -> Result<Json<PaymentReceipt>, ApiError> {
    let receipt = services.payments.charge(&request).await.map_err(|err| {
        tracing::info!(username = principal.username(), error = %err, "payment not captured");
        ApiError::from(err)
    })?;
    Ok(Json(receipt))
}
