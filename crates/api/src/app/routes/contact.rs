use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};

use ferremas_core::{ContactMessage, ContactReceipt};

use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// `POST /contact`: accept a message for the store or a specific seller.
pub async fn send_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(message): ApiJson<ContactMessage>,
) -> Result<(StatusCode, Json<ContactReceipt>), ApiError> {
    message.validate()?;

    if let Some(seller_id) = message.seller_id {
        services
            .catalog
            .get_seller(seller_id)
            .await
            .map_err(ApiError::lookup(format!("seller {seller_id}")))?;
    }

    let receipt = ContactReceipt::received(&message);
    tracing::info!(
        contact_id = %receipt.id,
        sender = principal.username(),
        seller_id = ?message.seller_id,
        "contact request received"
    );

    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
