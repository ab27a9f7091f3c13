use axum::{Json, extract::Extension};

use crate::app::dto::{LoginForm, TokenResponse};
use crate::app::errors::ApiError;
use crate::app::extract::ApiForm;
use crate::middleware::AuthState;

/// `POST /token`: exchange form credentials for a bearer token.
pub async fn issue_token(
    Extension(auth): Extension<AuthState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = auth.issuer.login(&form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(issued.access_token)))
}
