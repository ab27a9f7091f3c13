//! HTTP API: configuration, routing, access guards and request/response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
