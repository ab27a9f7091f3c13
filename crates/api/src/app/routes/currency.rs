use std::sync::Arc;

use axum::{Json, extract::Extension};

use ferremas_core::{ConversionQuery, CurrencyConversion};

use crate::app::errors::ApiError;
use crate::app::extract::ApiQuery;
use crate::app::services::AppServices;

/// `GET /currency/convert?amount=&from_currency=&to_currency=`
pub async fn convert(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(query): ApiQuery<ConversionQuery>,
) -> Result<Json<CurrencyConversion>, ApiError> {
    query.validate()?;
    let rate = services
        .rates
        .rate(&query.from_currency, &query.to_currency)
        .await?;
    Ok(Json(CurrencyConversion::apply(&query, rate)?))
}
