//! Orbit API: authorization and origin-control boundary for the site backend.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
