//! Process configuration, read once at startup.
//!
//! Every variable is validated here so that a misconfigured deployment fails
//! before binding a socket.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use ferremas_auth::{AuthConfigError, SigningAlgorithm, TokenTtl};
use ferremas_infra::UpstreamConfig;

pub const SECRET_KEY: &str = "SECRET_KEY";
pub const ALGORITHM: &str = "ALGORITHM";
pub const ACCESS_TOKEN_EXPIRE_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
pub const FERREMAS_DB_API_URL: &str = "FERREMAS_DB_API_URL";
pub const FERREMAS_DB_API_TOKEN: &str = "FERREMAS_DB_API_TOKEN";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const PORT: &str = "PORT";
pub const FERREMAS_USERS_FILE: &str = "FERREMAS_USERS_FILE";

const DEFAULT_TTL_MINUTES: i64 = 30;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    Auth(#[from] AuthConfigError),
}

#[derive(Clone)]
pub struct Settings {
    secret_key: String,
    pub algorithm: SigningAlgorithm,
    pub token_ttl: TokenTtl,
    pub upstream: UpstreamConfig,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub users_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse settings from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let secret_key = require(SECRET_KEY)?;

        let algorithm = match get(ALGORITHM) {
            Some(raw) => SigningAlgorithm::from_str(&raw)?,
            None => SigningAlgorithm::default(),
        };

        let ttl_minutes = match get(ACCESS_TOKEN_EXPIRE_MINUTES) {
            Some(raw) => raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
                name: ACCESS_TOKEN_EXPIRE_MINUTES,
                reason: e.to_string(),
            })?,
            None => DEFAULT_TTL_MINUTES,
        };
        let token_ttl = TokenTtl::from_minutes(ttl_minutes)?;

        let upstream_url = require(FERREMAS_DB_API_URL)?;
        if !(upstream_url.starts_with("http://") || upstream_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: FERREMAS_DB_API_URL,
                reason: "must be an http:// or https:// URL".to_string(),
            });
        }
        let upstream_token = require(FERREMAS_DB_API_TOKEN)?;

        let bind_addr = match get(BIND_ADDR) {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                name: BIND_ADDR,
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get(PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            secret_key,
            algorithm,
            token_ttl,
            upstream: UpstreamConfig::new(upstream_url, upstream_token),
            bind_addr,
            port,
            users_file: get(FERREMAS_USERS_FILE).map(PathBuf::from),
        })
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn users_file(&self) -> Option<&Path> {
        self.users_file.as_deref()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("upstream_url", &self.upstream.base_url)
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("users_file", &self.users_file)
            .finish()
    }
}
