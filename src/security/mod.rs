//! Security subsystem: the access-control boundary for every API request.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (decide CORS headers from the Origin allow-list)
//!     → bearer.rs (extract `Authorization: Bearer <token>`)
//!     → token.rs (verify signature and expiry under the process secret)
//!     → Pass to handler, or 401
//! ```
//!
//! # Design Decisions
//! - Everything here is a pure function of the request plus immutable state
//! - Token failures collapse to one negative outcome for callers
//! - Unrecognized origins never fail, they get the default origin

pub mod bearer;
pub mod cors;
pub mod secret;
pub mod token;

pub use bearer::get_token_from_request;
pub use cors::{decide_cors_headers, set_cors_headers, set_cors_headers_edge, CorsHeaders, MethodSet};
pub use secret::{Secret, SecretError};
pub use token::{Claims, TokenAuthority, TokenError};
