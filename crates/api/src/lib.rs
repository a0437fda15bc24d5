//! HTTP API: the identity webhook endpoint and its runtime configuration.

pub mod app;
pub mod config;
pub mod middleware;
