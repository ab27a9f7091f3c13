use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use ferremas_auth::LoginError;
use ferremas_core::DomainError;
use ferremas_infra::{PaymentError, RateError, UpstreamError};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401 with the `WWW-Authenticate: Bearer` challenge.
pub fn unauthenticated(message: impl Into<String>) -> Response {
    with_bearer_challenge(json_error(
        StatusCode::UNAUTHORIZED,
        "unauthenticated",
        message,
    ))
}

fn with_bearer_challenge(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Handler-level failures, mapped onto the JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error("{0}")]
    Forbidden(String),

    /// A body, query, form or path that failed to extract.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    /// Upstream lookup of `what`: a missing record becomes a domain `NotFound`.
    pub fn lookup(what: impl Into<String>) -> impl FnOnce(UpstreamError) -> ApiError {
        let what = what.into();
        move |err| match err {
            UpstreamError::NotFound { .. } => ApiError::Domain(DomainError::not_found(what)),
            other => ApiError::Upstream(other),
        }
    }
}

fn domain_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) => domain_response(err),
            ApiError::Upstream(UpstreamError::NotFound { .. }) => {
                json_error(StatusCode::NOT_FOUND, "not_found", "record not found")
            }
            // Details were logged by the upstream client.
            ApiError::Upstream(_) => json_error(
                StatusCode::BAD_GATEWAY,
                "upstream_unavailable",
                "upstream service unavailable",
            ),
            ApiError::Payment(PaymentError::Invalid(err)) => domain_response(err),
            ApiError::Payment(err @ PaymentError::Declined(_)) => {
                json_error(StatusCode::PAYMENT_REQUIRED, "payment_declined", err.to_string())
            }
            ApiError::Payment(PaymentError::Unavailable(detail)) => {
                tracing::error!(%detail, "payment gateway unavailable");
                json_error(
                    StatusCode::BAD_GATEWAY,
                    "upstream_unavailable",
                    "payment gateway unavailable",
                )
            }
            ApiError::Rate(err) => {
                json_error(StatusCode::BAD_GATEWAY, "upstream_unavailable", err.to_string())
            }
            ApiError::Login(LoginError::Denied) => with_bearer_challenge(json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                LoginError::Denied.to_string(),
            )),
            ApiError::Login(err) => {
                tracing::error!(error = %err, "login failed unexpectedly");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error",
                )
            }
            ApiError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Rejected { status, message } => json_error(status, "validation_error", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (DomainError::validation("bad").into(), StatusCode::BAD_REQUEST),
            (DomainError::not_found("product 3").into(), StatusCode::NOT_FOUND),
            (DomainError::conflict("stock").into(), StatusCode::CONFLICT),
            (
                UpstreamError::Transport("refused".to_string()).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                UpstreamError::NotFound { path: "products/3".to_string() }.into(),
                StatusCode::NOT_FOUND,
            ),
            (
                PaymentError::Declined("card".to_string()).into(),
                StatusCode::PAYMENT_REQUIRED,
            ),
            (LoginError::Denied.into(), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
            (
                ApiError::Rejected {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: "missing field `password`".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn unauthenticated_carries_bearer_challenge() {
        let response = unauthenticated("nope");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn lookup_names_the_missing_record() {
        let err = ApiError::lookup("branch 7")(UpstreamError::NotFound {
            path: "branches/7".to_string(),
        });
        assert!(matches!(err, ApiError::Domain(DomainError::NotFound(ref what)) if what == "branch 7"));

        let err = ApiError::lookup("branch 7")(UpstreamError::Status {
            path: "branches/7".to_string(),
            status: 500,
        });
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
