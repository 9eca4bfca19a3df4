pub mod access_control;
pub mod cors;

pub use access_control::{require_auth, Session};
pub use cors::cors_middleware;
