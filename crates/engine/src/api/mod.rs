//! API layer - HTTP entry points.

pub mod auth;
pub mod http;

pub use auth::AuthUser;
pub use http::{routes, ApiError};
