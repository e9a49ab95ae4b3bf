//! # Snip API
//!
//! Actix-web boundary for the token lifecycle: cookie transport, access token
//! middleware, the refresh/logout endpoints and error-to-status mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
