//! HTTP client for the upstream Ferremas data API.
//!
//! Every call carries the static access token in a `token` header. Failures are
//! logged here with full detail; callers only see the classified error.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("upstream record not found: {path}")]
    NotFound { path: String },

    #[error("upstream returned {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream response could not be decoded: {0}")]
    Decode(String),

    #[error("invalid upstream configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }
}

/// Record collections exposed by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Products,
    Branches,
    Sellers,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Products => "products",
            Entity::Branches => "branches",
            Entity::Sellers => "sellers",
        }
    }

    /// `products` or `products/{id}`.
    pub fn path(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{id}", self.as_str()),
            None => self.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let parsed = reqwest::Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::Config(format!("base url '{}': {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpstreamError::Config(format!(
                "base url '{}' must use http or https",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `fetch(entity, id)`: one record when `id` is given, the collection otherwise.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        entity: Entity,
        id: Option<i64>,
    ) -> Result<T, UpstreamError> {
        self.get_json(&entity.path(id)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, UpstreamError> {
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header("token", &self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "upstream request failed");
            UpstreamError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%method, path, "upstream record not found");
            return Err(UpstreamError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%method, path, status = status.as_u16(), detail = %detail, "upstream returned an error status");
            return Err(UpstreamError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "upstream response could not be decoded");
            UpstreamError::Decode(e.to_string())
        })
    }
}
