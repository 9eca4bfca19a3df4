//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, shared layers)
//!     → request.rs (request ID)
//!     → /api/*:  middleware/cors.rs → [middleware/access_control.rs] → handlers.rs
//!     → /edge/*: edge.rs (attaches its own CORS headers)
//!     → Send to client
//! ```

pub mod edge;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AdminLogin, AppState, HttpServer};
